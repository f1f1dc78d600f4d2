//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use concierge_core::error::AppError;
use concierge_entity::user::Role;

/// Runs `validator` rules and maps failures to a 400.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-registration request. New accounts always get the `USER` role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// Password.
    #[validate(length(min = 8, max = 256))]
    pub password: String,
    /// Display name.
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name; `null` clears it.
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,
}

/// Role change request (admin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role.
    pub role: Role,
}
