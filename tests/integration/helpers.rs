//! Test helpers for integration tests.
//!
//! Builds the full router over an in-memory user store, so no database is
//! needed to exercise the HTTP surface end to end.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use concierge_api::AppState;
use concierge_auth::PasswordHasher;
use concierge_core::config::AuthConfig;
use concierge_database::MemoryUserStore;
use concierge_entity::user::{Role, User};

/// Test application wrapper
pub struct TestApp {
    /// The Axum router
    pub router: Router,
    /// Shared application state
    pub state: AppState,
    /// Backing store, shared with `state`
    pub store: MemoryUserStore,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub fn new() -> Self {
        let config = AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        };
        let store = MemoryUserStore::new();
        let state =
            AppState::new(config, Arc::new(store.clone())).expect("Failed to build state");
        let router = concierge_api::router::build_router(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    /// Seed a user with a fixed id and a known password
    pub fn seed_user(&self, id: i64, username: &str, password: &str, role: Role) {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        let now = Utc::now();
        self.store.insert(User {
            id,
            username: username.to_string(),
            password_hash: hash,
            display_name: None,
            role,
            expires_at: DateTime::UNIX_EPOCH,
            created_at: now,
            updated_at: now,
        });
    }

    /// Issue a token directly, as a successful login would
    pub async fn issue_token(&self, user_id: i64) -> String {
        self.state
            .tokens
            .issue(user_id)
            .await
            .expect("Failed to issue token")
            .token
    }

    /// Login through the API and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {}",
            response.text
        );

        response.json()["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request, optionally with a bearer token
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        self.send(req, body).await
    }

    /// Make an HTTP request carrying the token as the session cookie
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: &str,
    ) -> TestResponse {
        let req = Request::builder().method(method).uri(path).header(
            header::COOKIE,
            format!("{}={token}", self.state.auth.session_cookie),
        );
        self.send(req, body).await
    }

    /// Make an HTTP request with a raw `Authorization` header value
    pub async fn request_with_authorization(
        &self,
        method: &str,
        path: &str,
        authorization: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::AUTHORIZATION, authorization);
        self.send(req, None).await
    }

    async fn send(&self, req: axum::http::request::Builder, body: Option<Value>) -> TestResponse {
        send(self.router.clone(), req, body).await
    }
}

/// Send one request through any router and collect the response
pub async fn send(
    router: Router,
    req: axum::http::request::Builder,
    body: Option<Value>,
) -> TestResponse {
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_string(&body).expect("Failed to serialize body"),
            )),
        None => req.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        text: String::from_utf8_lossy(&body_bytes).into_owned(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Raw body
    pub text: String,
}

impl TestResponse {
    /// Body parsed as JSON, or `Null` when it is not JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or(Value::Null)
    }

    /// Value of a response header, if present
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
