use super::*;
use std::{
    collections::HashMap,
    sync::Mutex as StdMutex,
};

use axum::{
    body::Body,
    extract::{Request, State},
    response::Response,
    Router,
};
use tokio::net::TcpListener;

const GENERAL_TOKEN: &str = "general-token";
const ADMIN_TOKEN: &str = "admin-token";

#[derive(Default)]
struct RecordingNavigator {
    redirects: StdMutex<Vec<CredentialScope>>,
}

impl RecordingNavigator {
    fn redirects(&self) -> Vec<CredentialScope> {
        self.redirects.lock().expect("navigator lock").clone()
    }
}

impl LoginNavigator for RecordingNavigator {
    fn redirect_to_login(&self, scope: CredentialScope) {
        self.redirects.lock().expect("navigator lock").push(scope);
    }
}

#[derive(Clone, Default)]
struct ServerState {
    auth_seen: Arc<StdMutex<Vec<(String, Option<String>)>>>,
    failures: Arc<StdMutex<HashMap<String, (u16, String)>>>,
}

impl ServerState {
    fn fail(&self, path: &str, status: u16, message: &str) {
        self.failures
            .lock()
            .expect("failures lock")
            .insert(path.to_string(), (status, message.to_string()));
    }

    fn auth_for(&self, path: &str) -> Option<Option<String>> {
        self.auth_seen
            .lock()
            .expect("auth lock")
            .iter()
            .find(|(seen, _)| seen == path)
            .map(|(_, auth)| auth.clone())
    }
}

fn json_response(body: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("response")
}

async fn backend(State(state): State<ServerState>, request: Request) -> Response {
    let path = request.uri().path().to_string();
    let auth = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    state
        .auth_seen
        .lock()
        .expect("auth lock")
        .push((path.clone(), auth));

    if let Some((status, message)) = state.failures.lock().expect("failures lock").get(&path) {
        return Response::builder()
            .status(*status)
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"message":"{message}"}}"#)))
            .expect("response");
    }

    if path.starts_with("/api/v1/designs/downloadorderdesigner/") {
        return Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/zip")
            .header(
                "content-disposition",
                "attachment; filename=\"order-77-designs.zip\"",
            )
            .body(Body::from(&b"zip-bytes"[..]))
            .expect("response");
    }

    match path.as_str() {
        "/api/v1/users/login" => json_response(r#"{"token":"fresh-general-token"}"#),
        "/api/v1/admin/login" => json_response(r#"{"token":"fresh-admin-token"}"#),
        "/api/v1/admin/users" => json_response(r#"{"users":[]}"#),
        "/api/v1/orders/getorders" => json_response(r#"{"orders":[],"totalPages":1}"#),
        "/api/v1/leads/getleads" => json_response(r#"{"leads":[],"totalPages":1}"#),
        "/api/v1/products/getproducts" => json_response(r#"{"products":[],"totalPages":1}"#),
        _ => json_response("{}"),
    }
}

struct TestHarness {
    gateway: ApiGateway,
    store: Arc<MemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
    server: ServerState,
}

async fn spawn_harness() -> TestHarness {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let server = ServerState::default();
    let app = Router::new().fallback(backend).with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let store = Arc::new(MemorySessionStore::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let base_url = Url::parse(&format!("http://{addr}")).expect("base url");
    let gateway = ApiGateway::new(base_url, store.clone(), navigator.clone());
    TestHarness {
        gateway,
        store,
        navigator,
        server,
    }
}

impl TestHarness {
    fn seed_both_sessions(&self) {
        self.store.set_token(CredentialScope::General, GENERAL_TOKEN);
        self.store.set_token(CredentialScope::Admin, ADMIN_TOKEN);
    }
}

#[test]
fn classifies_request_paths_by_substring() {
    // Login endpoints bootstrap unauthenticated, whatever the stored state.
    assert_eq!(
        RequestAuth::for_path("/api/v1/admin/login"),
        RequestAuth::Unauthenticated
    );
    assert_eq!(
        RequestAuth::for_path("/api/v1/users/login"),
        RequestAuth::Unauthenticated
    );

    for path in [
        "/api/v1/admin/users",
        "/api/v1/admin/reports?stage=printing",
        "/api/v1/products/getproducts?page=1&limit=10",
        "/api/v1/products/loadcategories",
        "/api/v1/category/getcategories?page=1&limit=10",
        "/api/v1/inventory/getinventory?page=2&limit=10",
    ] {
        assert_eq!(
            RequestAuth::for_path(path),
            RequestAuth::Scoped(CredentialScope::Admin),
            "expected admin scope for {path}"
        );
    }

    for path in [
        "/api/v1/leads/getleads?page=1&limit=10&filter=all",
        "/api/v1/orders/getorders?page=1&limit=10&filter=all",
        "/api/v1/tasks/gettasks?filter=all&page=1&limit=10",
        "/api/v1/designs/getdesigns",
        "/api/v1/printers/orders",
        "/api/v1/shipping/getshippings",
    ] {
        assert_eq!(
            RequestAuth::for_path(path),
            RequestAuth::Scoped(CredentialScope::General),
            "expected general scope for {path}"
        );
    }
}

#[tokio::test]
async fn admin_shaped_paths_carry_the_admin_credential() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();

    harness.gateway.staff_users().await.expect("staff users");

    assert_eq!(
        harness.server.auth_for("/api/v1/admin/users"),
        Some(Some(format!("Bearer {ADMIN_TOKEN}")))
    );
}

#[tokio::test]
async fn admin_paths_never_borrow_the_general_credential() {
    let harness = spawn_harness().await;
    harness
        .store
        .set_token(CredentialScope::General, GENERAL_TOKEN);

    harness.gateway.staff_users().await.expect("staff users");

    // Classification is by path shape, not by "is any token present".
    assert_eq!(harness.server.auth_for("/api/v1/admin/users"), Some(None));
}

#[tokio::test]
async fn general_scope_rides_the_general_credential() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();

    harness.gateway.orders(1, "all").await.expect("orders");

    assert_eq!(
        harness.server.auth_for("/api/v1/orders/getorders"),
        Some(Some(format!("Bearer {GENERAL_TOKEN}")))
    );
}

#[tokio::test]
async fn empty_store_sends_no_authorization_header() {
    let harness = spawn_harness().await;

    let page = harness.gateway.orders(1, "all").await.expect("orders");

    assert!(page.orders.is_empty());
    assert_eq!(harness.server.auth_for("/api/v1/orders/getorders"), Some(None));
}

#[tokio::test]
async fn login_requests_are_always_unauthenticated() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();

    harness
        .gateway
        .login("lead@dorakart.test", "secret")
        .await
        .expect("login");
    harness
        .gateway
        .admin_login("9999999999", "secret")
        .await
        .expect("admin login");

    assert_eq!(harness.server.auth_for("/api/v1/users/login"), Some(None));
    assert_eq!(harness.server.auth_for("/api/v1/admin/login"), Some(None));

    // Successful logins rewrite their own slot only.
    assert_eq!(
        harness.store.token(CredentialScope::General).as_deref(),
        Some("fresh-general-token")
    );
    assert_eq!(
        harness.store.token(CredentialScope::Admin).as_deref(),
        Some("fresh-admin-token")
    );
}

#[tokio::test]
async fn unauthorized_admin_request_clears_admin_slot_and_redirects_once() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();
    harness
        .server
        .fail("/api/v1/admin/users", 401, "token expired");

    let err = harness.gateway.staff_users().await.expect_err("must fail");

    match err {
        GatewayError::SessionExpired { scope } => assert_eq!(scope, CredentialScope::Admin),
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert_eq!(harness.store.token(CredentialScope::Admin), None);
    assert_eq!(
        harness.store.token(CredentialScope::General).as_deref(),
        Some(GENERAL_TOKEN)
    );
    assert_eq!(harness.navigator.redirects(), vec![CredentialScope::Admin]);
}

#[tokio::test]
async fn unauthorized_general_request_clears_general_slot_and_redirects_once() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();
    harness
        .server
        .fail("/api/v1/leads/getleads", 401, "token expired");

    let err = harness.gateway.leads(1, "all").await.expect_err("must fail");

    match err {
        GatewayError::SessionExpired { scope } => assert_eq!(scope, CredentialScope::General),
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert_eq!(harness.store.token(CredentialScope::General), None);
    assert_eq!(
        harness.store.token(CredentialScope::Admin).as_deref(),
        Some(ADMIN_TOKEN)
    );
    assert_eq!(harness.navigator.redirects(), vec![CredentialScope::General]);
}

#[tokio::test]
async fn unauthorized_login_attempt_propagates_without_side_effects() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();
    harness
        .server
        .fail("/api/v1/users/login", 401, "Invalid credentials");
    harness
        .server
        .fail("/api/v1/admin/login", 401, "Invalid credentials");

    let err = harness
        .gateway
        .login("lead@dorakart.test", "wrong")
        .await
        .expect_err("must fail");
    match err {
        GatewayError::Api(exception) => {
            assert_eq!(exception.status, 401);
            assert_eq!(exception.message, "Invalid credentials");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    let err = harness
        .gateway
        .admin_login("9999999999", "wrong")
        .await
        .expect_err("must fail");
    assert!(matches!(err, GatewayError::Api(exception) if exception.status == 401));

    // A rejected login never tears down an existing session or navigates.
    assert_eq!(
        harness.store.token(CredentialScope::General).as_deref(),
        Some(GENERAL_TOKEN)
    );
    assert_eq!(
        harness.store.token(CredentialScope::Admin).as_deref(),
        Some(ADMIN_TOKEN)
    );
    assert!(harness.navigator.redirects().is_empty());
}

#[tokio::test]
async fn api_error_bodies_surface_their_message() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();
    harness
        .server
        .fail("/api/v1/leads/createlead", 422, "phone already exists");

    let draft = LeadDraft {
        fullname: "Asha".to_string(),
        phone: "8888888888".to_string(),
        rating: "hot".to_string(),
        status: "new".to_string(),
        note: String::new(),
        address: String::new(),
    };
    let err = harness
        .gateway
        .create_lead(&draft)
        .await
        .expect_err("must fail");

    match err {
        GatewayError::Api(exception) => {
            assert_eq!(exception.status, 422);
            assert_eq!(exception.message, "phone already exists");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert!(harness.navigator.redirects().is_empty());
}

#[tokio::test]
async fn downloads_use_the_content_disposition_filename() {
    let harness = spawn_harness().await;
    harness.seed_both_sessions();

    let file = harness
        .gateway
        .download_designer_bundle(&OrderId("order-77".to_string()))
        .await
        .expect("download");

    assert_eq!(file.filename, "order-77-designs.zip");
    assert_eq!(file.bytes, b"zip-bytes");
}

#[test]
fn content_disposition_parsing_handles_quoting_and_absence() {
    assert_eq!(
        content_disposition_filename("attachment; filename=\"report.zip\""),
        Some("report.zip".to_string())
    );
    assert_eq!(
        content_disposition_filename("attachment; filename=plain.zip"),
        Some("plain.zip".to_string())
    );
    assert_eq!(content_disposition_filename("attachment"), None);
    assert_eq!(content_disposition_filename("attachment; filename="), None);
}
