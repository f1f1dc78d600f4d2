//! Route definitions for the Concierge HTTP API.
//!
//! All routes are mounted under `/api`. Protected groups sit behind the
//! authentication layer; each group then carries its own role policy, so the
//! guard always runs after a principal has been resolved.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use concierge_entity::user::Role;

use crate::handlers;
use crate::middleware;
use crate::middleware::rbac::RouterExt;
use crate::state::AppState;

/// Build the complete Axum router, threading `state` through every route.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(session_routes())
        .merge(account_routes())
        .merge(admin_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_principal,
        ));

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Unauthenticated endpoints: health, register, login
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
}

/// Any authenticated principal, whatever its role
fn session_routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(handlers::auth::logout))
}

/// Self-service account endpoints
fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/me",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .authorize([Role::Admin, Role::User])
}

/// Back-office user management
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users/{id}/role", put(handlers::admin::users::update_role))
        .route("/admin/users/{id}", delete(handlers::admin::users::delete_user))
        .authorize([Role::Admin])
}
