//! # concierge-api
//!
//! HTTP API layer for Concierge built on Axum.
//!
//! Provides the REST endpoints, the authentication layer that turns a
//! bearer token or session cookie into a [`concierge_auth::Principal`], the
//! per-route role guard, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use middleware::rbac::RouterExt;
pub use state::AppState;
