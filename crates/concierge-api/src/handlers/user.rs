//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use concierge_core::error::AppError;

use crate::dto::request::{UpdateProfileRequest, validate_body};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentPrincipal;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(principal: CurrentPrincipal) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(&principal.user)))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    principal: CurrentPrincipal,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validate_body(&req)?;

    let user = state
        .users
        .update_display_name(principal.user_id(), req.display_name.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
