//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use concierge_core::error::AppError;

use crate::dto::request::UpdateRoleRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentPrincipal;
use crate::state::AppState;

/// PUT /api/admin/users/{id}/role
///
/// Takes effect on the target's next request; outstanding tokens stay valid
/// because the role is read from the user row, not from the token.
pub async fn update_role(
    State(state): State<AppState>,
    admin: CurrentPrincipal,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .users
        .update_role(id, req.role)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

    info!(admin_id = admin.user_id(), user_id = id, role = %req.role, "Changed user role");
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    admin: CurrentPrincipal,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if id == admin.user_id() {
        return Err(AppError::validation("Admins cannot delete their own account").into());
    }

    if !state.users.delete(id).await? {
        return Err(AppError::not_found(format!("User {id} not found")).into());
    }

    info!(admin_id = admin.user_id(), user_id = id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}
