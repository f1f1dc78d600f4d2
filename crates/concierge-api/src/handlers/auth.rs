//! Auth handlers: register, login, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::info;

use concierge_entity::user::{CreateUser, Role};

use crate::dto::request::{LoginRequest, RegisterRequest, validate_body};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentPrincipal;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    validate_body(&req)?;

    let password_hash = state.password_hasher.hash(&req.password)?;
    let user = state
        .users
        .create(&CreateUser {
            username: req.username,
            password_hash,
            display_name: req.display_name,
            role: Role::User,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "Registered user");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// POST /api/auth/login
///
/// Returns the token in the body and also sets it as the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    validate_body(&req)?;

    let Some(user) = state.users.find_by_username(&req.username).await? else {
        return Err(ApiError::unauthorized(
            state.auth.realm.as_str(),
            "User not found",
        ));
    };

    if !state
        .password_hasher
        .verify(&req.password, &user.password_hash)?
    {
        info!(user_id = user.id, "Login rejected: wrong password");
        return Err(ApiError::unauthorized(
            state.auth.realm.as_str(),
            "Invalid credentials",
        ));
    }

    let issued = state.tokens.issue(user.id).await?;

    let cookie = Cookie::build((state.auth.session_cookie.clone(), issued.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: UserResponse::from(&user),
        })),
    ))
}

/// POST /api/auth/logout
///
/// Invalidates every token the caller holds, not just the one presented.
pub async fn logout(
    State(state): State<AppState>,
    principal: CurrentPrincipal,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), ApiError> {
    state.tokens.invalidate(principal.user_id()).await?;

    let expired = Cookie::build((state.auth.session_cookie.clone(), "")).path("/");
    Ok((jar.remove(expired), StatusCode::NO_CONTENT))
}
