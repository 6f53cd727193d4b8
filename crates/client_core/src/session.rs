//! Credential slots and the request-scope classifier.
//!
//! The backend runs two independent bearer-token namespaces: an
//! administrative session and a general staff session. Which slot a request
//! rides on is decided by the shape of its path, and both slots persist
//! across restarts under fixed storage keys.

use std::{collections::BTreeMap, io, path::PathBuf, sync::Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroize;

pub const GENERAL_TOKEN_KEY: &str = "dorakart_acc_token";
pub const ADMIN_TOKEN_KEY: &str = "dorakart_admin_token";

pub const GENERAL_LOGIN_PATH: &str = "/api/v1/users/login";
pub const ADMIN_LOGIN_PATH: &str = "/api/v1/admin/login";

/// Path substrings that route a request onto the administrative slot.
const ADMIN_PATH_MARKERS: &[&str] = &["admin", "products", "categories", "inventory"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialScope {
    General,
    Admin,
}

impl CredentialScope {
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::General => GENERAL_TOKEN_KEY,
            Self::Admin => ADMIN_TOKEN_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Admin => "admin",
        }
    }

    /// Login entry point the console returns to when this scope's session
    /// ends.
    pub fn login_entry(self) -> &'static str {
        match self {
            Self::General => "/login",
            Self::Admin => "/admin/login",
        }
    }
}

pub fn is_login_path(path: &str) -> bool {
    path.contains(ADMIN_LOGIN_PATH) || path.contains(GENERAL_LOGIN_PATH)
}

/// Credential selection for one outgoing request.
///
/// Login endpoints always go out unauthenticated so a stale token can never
/// poison a sign-in attempt; everything else picks a slot by path substring.
/// The substring test is deliberately the legacy behavior and lives only
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAuth {
    Unauthenticated,
    Scoped(CredentialScope),
}

impl RequestAuth {
    pub fn for_path(path: &str) -> Self {
        if is_login_path(path) {
            return Self::Unauthenticated;
        }
        if ADMIN_PATH_MARKERS.iter().any(|marker| path.contains(marker)) {
            Self::Scoped(CredentialScope::Admin)
        } else {
            Self::Scoped(CredentialScope::General)
        }
    }
}

/// Sink for the 401 policy's redirect side effect. Fired at most once per
/// intercepted response.
pub trait LoginNavigator: Send + Sync {
    fn redirect_to_login(&self, scope: CredentialScope);
}

/// Navigator for contexts with nowhere to redirect to (one-shot tools,
/// tests that only care about credentials).
pub struct NoopNavigator;

impl LoginNavigator for NoopNavigator {
    fn redirect_to_login(&self, _scope: CredentialScope) {}
}

/// Two keyed string slots: written on successful login, read on every
/// outgoing request, deleted on 401-triggered logout or an explicit
/// sign-out.
pub trait SessionStore: Send + Sync {
    fn token(&self, scope: CredentialScope) -> Option<String>;
    fn set_token(&self, scope: CredentialScope, token: &str);
    fn clear(&self, scope: CredentialScope);
}

/// Volatile store; sessions die with the process.
#[derive(Default)]
pub struct MemorySessionStore {
    slots: Mutex<BTreeMap<&'static str, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self, scope: CredentialScope) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(scope.storage_key()).cloned())
    }

    fn set_token(&self, scope: CredentialScope, token: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            if let Some(mut old) = slots.insert(scope.storage_key(), token.to_string()) {
                old.zeroize();
            }
        }
    }

    fn clear(&self, scope: CredentialScope) {
        if let Ok(mut slots) = self.slots.lock() {
            if let Some(mut old) = slots.remove(scope.storage_key()) {
                old.zeroize();
            }
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSlots(BTreeMap<String, String>);

/// Store persisting both slots as a small JSON document in the user profile
/// directory, the desktop counterpart of browser-local storage.
pub struct FileSessionStore {
    path: PathBuf,
    slots: Mutex<PersistedSlots>,
}

impl FileSessionStore {
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let slots = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|err| {
                warn!(path = %path.display(), "discarding unreadable session file: {err}");
                PersistedSlots::default()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => PersistedSlots::default(),
            Err(err) => return Err(err),
        };
        Ok(Self {
            path,
            slots: Mutex::new(slots),
        })
    }

    /// Conventional location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("dorakart-console").join("session.json"))
    }

    pub fn open_default() -> io::Result<Self> {
        let path = Self::default_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no writable profile directory")
        })?;
        Self::open(path)
    }

    fn persist(&self, slots: &PersistedSlots) {
        match serde_json::to_string_pretty(slots) {
            Ok(text) => {
                if let Err(err) = std::fs::write(&self.path, text) {
                    warn!(path = %self.path.display(), "failed to persist session slots: {err}");
                }
            }
            Err(err) => warn!("failed to encode session slots: {err}"),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self, scope: CredentialScope) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.0.get(scope.storage_key()).cloned())
    }

    fn set_token(&self, scope: CredentialScope, token: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            if let Some(mut old) = slots
                .0
                .insert(scope.storage_key().to_string(), token.to_string())
            {
                old.zeroize();
            }
            self.persist(&slots);
        }
    }

    fn clear(&self, scope: CredentialScope) {
        if let Ok(mut slots) = self.slots.lock() {
            if let Some(mut old) = slots.0.remove(scope.storage_key()) {
                old.zeroize();
            }
            self.persist(&slots);
        }
    }
}
