use super::*;
use std::sync::atomic::{AtomicU32, Ordering};

static TEST_SEQ: AtomicU32 = AtomicU32::new(0);

fn temp_session_path() -> std::path::PathBuf {
    let unique = format!(
        "dorakart_session_{}_{}.json",
        std::process::id(),
        TEST_SEQ.fetch_add(1, Ordering::Relaxed)
    );
    std::env::temp_dir().join(unique)
}

#[test]
fn memory_store_slots_are_independent() {
    let store = MemorySessionStore::new();
    store.set_token(CredentialScope::General, "general-token");
    store.set_token(CredentialScope::Admin, "admin-token");

    store.clear(CredentialScope::Admin);

    assert_eq!(store.token(CredentialScope::Admin), None);
    assert_eq!(
        store.token(CredentialScope::General).as_deref(),
        Some("general-token")
    );
}

#[test]
fn file_store_round_trips_across_reopen() {
    let path = temp_session_path();

    {
        let store = FileSessionStore::open(&path).expect("open");
        store.set_token(CredentialScope::General, "persisted-general");
        store.set_token(CredentialScope::Admin, "persisted-admin");
    }

    let store = FileSessionStore::open(&path).expect("reopen");
    assert_eq!(
        store.token(CredentialScope::General).as_deref(),
        Some("persisted-general")
    );
    assert_eq!(
        store.token(CredentialScope::Admin).as_deref(),
        Some("persisted-admin")
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_clear_removes_only_the_named_slot() {
    let path = temp_session_path();

    {
        let store = FileSessionStore::open(&path).expect("open");
        store.set_token(CredentialScope::General, "general-token");
        store.set_token(CredentialScope::Admin, "admin-token");
        store.clear(CredentialScope::General);
    }

    let store = FileSessionStore::open(&path).expect("reopen");
    assert_eq!(store.token(CredentialScope::General), None);
    assert_eq!(
        store.token(CredentialScope::Admin).as_deref(),
        Some("admin-token")
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_uses_the_fixed_storage_keys() {
    let path = temp_session_path();

    let store = FileSessionStore::open(&path).expect("open");
    store.set_token(CredentialScope::General, "g");
    store.set_token(CredentialScope::Admin, "a");

    let raw = std::fs::read_to_string(&path).expect("read session file");
    assert!(raw.contains(GENERAL_TOKEN_KEY));
    assert!(raw.contains(ADMIN_TOKEN_KEY));

    let _ = std::fs::remove_file(path);
}

#[test]
fn unreadable_session_file_starts_empty() {
    let path = temp_session_path();
    std::fs::write(&path, "not json at all").expect("seed file");

    let store = FileSessionStore::open(&path).expect("open despite junk");
    assert_eq!(store.token(CredentialScope::General), None);
    assert_eq!(store.token(CredentialScope::Admin), None);

    let _ = std::fs::remove_file(path);
}
