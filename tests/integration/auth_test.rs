//! Integration tests for the authentication flow.

use axum::http::{StatusCode, header};
use serde_json::json;

use concierge_database::UserStore;
use concierge_entity::user::Role;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["status"], "ok");
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "password": "password123",
                "display_name": "Alice",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
    let body = response.json();
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "USER");
    assert!(body["data"].get("password_hash").is_none());

    let token = app.login("alice", "password123").await;
    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["data"]["display_name"], "Alice");
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let app = TestApp::new();
    app.seed_user(1, "alice", "password123", Role::User);

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "alice", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "alice", "password": "short" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::new();
    app.seed_user(1, "alice", "password123", Role::User);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.json()["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();
    let cookie = response.header(header::SET_COOKIE).unwrap();
    assert!(cookie.starts_with(&format!("session={token}")));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "User not found");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.seed_user(1, "alice", "password123", Role::User);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "wrongpassword" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Invalid credentials");
}

#[tokio::test]
async fn test_missing_credential() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Missing or empty Authorization header");
    assert_eq!(
        response.header(header::WWW_AUTHENTICATE),
        Some("Bearer realm=\"concierge\"")
    );
}

#[tokio::test]
async fn test_empty_bearer_counts_as_missing() {
    let app = TestApp::new();

    let response = app
        .request_with_authorization("GET", "/api/users/me", "Bearer   ")
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Missing or empty Authorization header");
}

#[tokio::test]
async fn test_lowercase_bearer_scheme_authenticates() {
    let app = TestApp::new();
    app.seed_user(4, "dana", "password123", Role::User);
    let token = app.issue_token(4).await;

    let response = app
        .request_with_authorization("GET", "/api/users/me", &format!("bearer {token}"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["id"], 4);
}

#[tokio::test]
async fn test_garbage_token_is_invalid() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/users/me", None, Some("not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Invalid token");
}

#[tokio::test]
async fn test_cookie_authenticates_when_header_absent() {
    let app = TestApp::new();
    app.seed_user(3, "carol", "password123", Role::User);
    let token = app.issue_token(3).await;

    let response = app
        .request_with_cookie("GET", "/api/users/me", None, &token)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["id"], 3);
}

#[tokio::test]
async fn test_logout_revokes_outstanding_tokens() {
    let app = TestApp::new();
    app.seed_user(1, "alice", "password123", Role::User);
    let token = app.login("alice", "password123").await;

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "display_name": "Still here?" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Token is not valid or has expired");
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let app = TestApp::new();
    app.seed_user(5, "erin", "password123", Role::User);
    let token = app.issue_token(5).await;

    app.store.delete(5).await.unwrap();

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Token is not valid or has expired");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::new();
    app.seed_user(1, "alice", "password123", Role::User);
    let token = app.issue_token(1).await;

    let response = app
        .request(
            "PUT",
            "/api/users/me",
            Some(json!({ "display_name": "Alice A." })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["display_name"], "Alice A.");
}
