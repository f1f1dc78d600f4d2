//! Maps domain errors and auth outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use concierge_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error type returned by handlers and middleware.
///
/// Authentication and authorization failures are plain-text bodies so the
/// message is the whole response; everything else uses the JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Any domain or storage error.
    #[error(transparent)]
    App(#[from] AppError),
    /// 401 with a `WWW-Authenticate` challenge.
    #[error("{message}")]
    Unauthorized {
        /// Realm advertised in the challenge.
        realm: String,
        /// Response body.
        message: String,
    },
    /// 403 carrying the missing-role message.
    #[error("{0}")]
    Forbidden(String),
}

impl ApiError {
    /// Builds a 401 for `realm`.
    pub fn unauthorized(realm: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            realm: realm.into(),
            message: message.into(),
        }
    }
}

fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::App(err) => {
                let (status, error_code) = status_for(err.kind);
                if status.is_server_error() {
                    tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
                }

                let body = ApiErrorResponse {
                    error: error_code.to_string(),
                    message: err.message,
                };
                (status, Json(body)).into_response()
            }
            Self::Unauthorized { realm, message } => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, format!("Bearer realm=\"{realm}\""))],
                message,
            )
                .into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
        }
    }
}
