//! Integration tests for per-route role enforcement.

use axum::Router;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde_json::json;

use concierge_api::RouterExt;
use concierge_auth::Principal;
use concierge_entity::user::{Role, User};

use crate::helpers::{TestApp, send};

fn principal(id: i64, role: Role) -> Principal {
    let now = Utc::now();
    Principal {
        user: User {
            id,
            username: format!("user{id}"),
            password_hash: String::new(),
            display_name: None,
            role,
            expires_at: DateTime::UNIX_EPOCH,
            created_at: now,
            updated_at: now,
        },
        expires_at: now,
    }
}

/// A router whose only route is guarded by `roles` and whose requests carry
/// a principal with `role`, standing in for the authentication layer.
fn guarded_router(roles: Vec<Role>, role: Option<Role>) -> Router {
    Router::new()
        .route("/guarded", get(|| async { "reached" }))
        .authorize(roles)
        .layer(middleware::from_fn(move |mut request: Request, next: Next| {
            if let Some(role) = role {
                request.extensions_mut().insert(principal(1, role));
            }
            async move { next.run(request).await }
        }))
}

fn get_guarded() -> axum::http::request::Builder {
    axum::http::Request::builder().method("GET").uri("/guarded")
}

#[tokio::test]
async fn test_user_is_forbidden_from_admin_routes() {
    let app = TestApp::new();
    app.seed_user(42, "plain", "password123", Role::User);
    let token = app.issue_token(42).await;

    let response = app
        .request(
            "PUT",
            "/api/admin/users/42/role",
            Some(json!({ "role": "ADMIN" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text, "Role ADMIN required");
}

#[tokio::test]
async fn test_admin_reaches_account_routes() {
    let app = TestApp::new();
    app.seed_user(7, "boss", "password123", Role::Admin);
    let token = app.issue_token(7).await;

    let response = app.request("GET", "/api/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["role"], "ADMIN");
}

#[tokio::test]
async fn test_unauthenticated_admin_route_is_401_not_403() {
    let app = TestApp::new();

    let response = app
        .request("DELETE", "/api/admin/users/1", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_changes_role_and_it_applies_immediately() {
    let app = TestApp::new();
    app.seed_user(1, "boss", "password123", Role::Admin);
    app.seed_user(2, "plain", "password123", Role::User);
    let admin_token = app.issue_token(1).await;
    let user_token = app.issue_token(2).await;

    let forbidden = app
        .request("DELETE", "/api/admin/users/1", None, Some(&user_token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let promoted = app
        .request(
            "PUT",
            "/api/admin/users/2/role",
            Some(json!({ "role": "ADMIN" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.json()["data"]["role"], "ADMIN");

    let missing = app
        .request("DELETE", "/api/admin/users/99", None, Some(&user_token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_deletes_user() {
    let app = TestApp::new();
    app.seed_user(1, "boss", "password123", Role::Admin);
    app.seed_user(2, "plain", "password123", Role::User);
    let admin_token = app.issue_token(1).await;
    let user_token = app.issue_token(2).await;

    let deleted = app
        .request("DELETE", "/api/admin/users/2", None, Some(&admin_token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = app
        .request("GET", "/api/users/me", None, Some(&user_token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    let own = app
        .request("DELETE", "/api/admin/users/1", None, Some(&admin_token))
        .await;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_policy_admits_everyone() {
    let router = guarded_router(Vec::new(), None);

    let response = send(router, get_guarded(), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text, "reached");
}

#[tokio::test]
async fn test_multi_role_policy_message_lists_roles() {
    let admitted = send(
        guarded_router(vec![Role::Admin, Role::User], Some(Role::User)),
        get_guarded(),
        None,
    )
    .await;
    assert_eq!(admitted.status, StatusCode::OK);

    let rejected = send(
        guarded_router(vec![Role::Admin, Role::User], None),
        get_guarded(),
        None,
    )
    .await;
    assert_eq!(rejected.status, StatusCode::FORBIDDEN);
    assert_eq!(rejected.text, "Roles ADMIN, USER required");
}

#[tokio::test]
async fn test_single_role_policy_rejects_other_role() {
    let response = send(
        guarded_router(vec![Role::Admin], Some(Role::User)),
        get_guarded(),
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.text, "Role ADMIN required");
}
