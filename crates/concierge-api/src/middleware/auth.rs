//! Authentication layer: resolves the request's credential to a [`Principal`].
//!
//! The credential comes from `Authorization: Bearer <token>` or, when that
//! header is absent, from the session cookie set at login. On success the
//! principal is stored in the request extensions for the role guard and the
//! [`crate::extractors::CurrentPrincipal`] extractor.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use concierge_auth::token::{AuthFailure, Principal};

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with 401 unless it carries a valid credential.
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = credential(request.headers(), &state.auth.session_cookie) else {
        return reject(&state, AuthFailure::MissingCredential);
    };

    match state.tokens.authenticate(&token).await {
        Ok(principal) => {
            debug!(user_id = principal.user_id(), role = %principal.role(), "Authenticated");
            request.extensions_mut().insert::<Principal>(principal);
            next.run(request).await
        }
        Err(AuthFailure::Storage(err)) => ApiError::from(err).into_response(),
        Err(failure) => reject(&state, failure),
    }
}

fn reject(state: &AppState, failure: AuthFailure) -> Response {
    debug!(reason = %failure, "Authentication failed");
    ApiError::unauthorized(state.auth.realm.clone(), failure.to_string()).into_response()
}

/// Pulls the raw token from the bearer header, falling back to the session cookie.
fn credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let token = value
            .to_str()
            .ok()
            .and_then(bearer_token)
            .filter(|t| !t.is_empty())?;
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Token part of a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim_start().split_once(' ')?;
    scheme.eq_ignore_ascii_case("Bearer").then_some(token.trim())
}
