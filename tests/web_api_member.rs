//! Web API Member Tests
//!
//! Integration tests for registration, login sessions and profile updates.

use axum::http::StatusCode;
use axum_test::TestServer;
use bbs::web::handlers::AppState;
use bbs::web::router::create_router;
use bbs::{AttachmentStorage, Database};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

const COOKIE: &str = "BBS_SESSION";

/// Create a test server with an in-memory database.
async fn create_test_server() -> (TestServer, Arc<AppState>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let storage =
        AttachmentStorage::new(temp_dir.path().join("files")).expect("Failed to open storage");

    let app_state = Arc::new(AppState::new(db, storage));
    let router = create_router(app_state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, app_state, temp_dir)
}

fn join_form(id: &str, name: &str, pass: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "pass": pass,
        "emailId": id,
        "emailDomain": "example.com",
        "mobile1": "010",
        "mobile2": "1234",
        "mobile3": "5678",
        "phone1": "02",
        "phone2": "",
        "phone3": "",
        "zipcode": "12345",
        "address1": "Seoul",
        "address2": "Apt 1"
    })
}

/// Helper to register a member.
async fn register(server: &TestServer, id: &str, pass: &str) -> Value {
    let response = server
        .post("/api/members")
        .form(&join_form(id, "Tester", pass))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn test_register_composes_contact_fields() {
    let (server, _state, _dir) = create_test_server().await;

    let body = register(&server, "hong", "secret").await;
    let member = &body["data"];
    assert_eq!(member["id"], "hong");
    assert_eq!(member["email"], "hong@example.com");
    assert_eq!(member["mobile"], "010-1234-5678");
    assert_eq!(member["phone"], "");
    assert_eq!(member["email_get"], false);
    assert!(member.get("pass").is_none());
}

#[tokio::test]
async fn test_register_duplicate_id() {
    let (server, _state, _dir) = create_test_server().await;
    register(&server, "hong", "secret").await;

    let response = server
        .post("/api/members")
        .form(&join_form("hong", "Other", "other"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_missing_field() {
    let (server, _state, _dir) = create_test_server().await;

    let mut form = join_form("hong", "Tester", "secret");
    form["name"] = json!("");
    let response = server.post("/api/members").form(&form).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_overlap_id_check() {
    let (server, _state, _dir) = create_test_server().await;
    register(&server, "u1", "pw").await;

    let body: Value = server
        .get("/api/members/overlap-id-check?id=u1")
        .await
        .json();
    assert_eq!(body["data"], json!({ "id": "u1", "overlap": true }));

    let body: Value = server
        .get("/api/members/overlap-id-check?id=u2")
        .await
        .json();
    assert_eq!(body["data"]["overlap"], false);
}

#[tokio::test]
async fn test_pass_check() {
    let (server, _state, _dir) = create_test_server().await;
    register(&server, "u1", "pw").await;

    let body: Value = server
        .get("/api/members/pass-check?id=u1&pass=pw")
        .await
        .json();
    assert_eq!(body["data"]["result"], true);

    let body: Value = server
        .get("/api/members/pass-check?id=u1&pass=nope")
        .await
        .json();
    assert_eq!(body["data"]["result"], false);

    let body: Value = server
        .get("/api/members/pass-check?id=ghost&pass=pw")
        .await
        .json();
    assert_eq!(body["data"]["result"], false);
}

#[tokio::test]
async fn test_login_outcomes() {
    let (server, _state, _dir) = create_test_server().await;
    register(&server, "hong", "secret").await;

    let response = server
        .post("/api/members/login")
        .form(&json!({ "userId": "ghost", "pass": "x" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "secret" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["result"], 1);
    assert_eq!(body["data"]["member"]["id"], "hong");

    let cookie = response.cookie(COOKIE);
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
}

#[tokio::test]
async fn test_me_requires_session() {
    let (server, _state, _dir) = create_test_server().await;

    let response = server.get("/api/members/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let (server, state, _dir) = create_test_server().await;
    register(&server, "hong", "secret").await;

    let response = server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "secret" }))
        .await;
    let cookie = response.cookie(COOKIE);
    assert_eq!(state.sessions.read().await.session_count(), 1);

    let body: Value = server
        .get("/api/members/me")
        .add_cookie(cookie.clone())
        .await
        .json();
    assert_eq!(body["data"]["id"], "hong");

    let response = server
        .post("/api/members/logout")
        .add_cookie(cookie.clone())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["logged_out"], true);
    assert_eq!(state.sessions.read().await.session_count(), 0);

    server
        .get("/api/members/me")
        .add_cookie(cookie)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let (server, _state, _dir) = create_test_server().await;

    let response = server.post("/api/members/logout").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["logged_out"], false);
}

#[tokio::test]
async fn test_update_me_refreshes_session_and_password() {
    let (server, _state, _dir) = create_test_server().await;
    register(&server, "hong", "secret").await;

    let cookie = server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "secret" }))
        .await
        .cookie(COOKIE);

    let mut form = join_form("ignored", "New Name", "changed");
    form["phone2"] = json!("123");
    form["phone3"] = json!("4567");
    form["emailGet"] = json!("true");
    let response = server
        .put("/api/members/me")
        .add_cookie(cookie.clone())
        .form(&form)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], "hong");
    assert_eq!(body["data"]["name"], "New Name");
    assert_eq!(body["data"]["phone"], "02-123-4567");
    assert_eq!(body["data"]["email_get"], true);

    let body: Value = server
        .get("/api/members/me")
        .add_cookie(cookie)
        .await
        .json();
    assert_eq!(body["data"]["name"], "New Name");

    server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "secret" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/members/login")
        .form(&json!({ "userId": "hong", "pass": "changed" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_update_me_requires_session() {
    let (server, _state, _dir) = create_test_server().await;

    let response = server
        .put("/api/members/me")
        .form(&join_form("hong", "Name", "pw"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let (server, _state, _dir) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");

    let body: Value = server.get("/api-docs/openapi.json").await.json();
    assert!(body["paths"]["/api/boards"].is_object());
    assert!(body["paths"]["/api/members/login"].is_object());
}
