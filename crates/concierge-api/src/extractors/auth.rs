//! `CurrentPrincipal` extractor: reads the principal placed by the
//! authentication layer.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use concierge_auth::token::Principal;
use concierge_core::error::AppError;

use crate::error::ApiError;

/// The authenticated principal for this request.
///
/// Only usable on routes behind
/// [`require_principal`](crate::middleware::auth::require_principal).
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl std::ops::Deref for CurrentPrincipal {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| {
                AppError::internal("Route reads the principal without the authentication layer")
                    .into()
            })
    }
}
