//! Integration tests for registration, login and profile.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_register_then_profile() {
    let app = TestApp::new().await;
    let token = app.register("alice").await;

    let response = app.request("GET", "/auth/profile", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");
    assert_eq!(response.body["email"], "alice@example.com");
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_returns_bearer_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/oauth/register",
            Some(json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "bearer");
    assert!(!response.token().is_empty());
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "username": "alice",
                "email": "other@example.com",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_bad_email() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "username": "dave",
                "email": "not-an-email",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_json_and_form() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let json_login = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "alice", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(json_login.status, StatusCode::OK);

    let form_login = app
        .request_form(
            "/auth/oauth/login",
            &format!("username=alice&password={PASSWORD}"),
        )
        .await;
    assert_eq!(form_login.status, StatusCode::OK);

    let profile = app
        .request("GET", "/auth/profile", None, Some(&form_login.token()))
        .await;
    assert_eq!(profile.body["username"], "alice");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.register("alice").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "alice", "password": "wrong-password" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");

    let unknown = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["message"], response.body["message"]);
}

#[tokio::test]
async fn test_protected_routes_need_valid_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/files", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/files", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "UNAUTHORIZED");
}
