// ============================================================================
// Session Server - Auth Handlers
// File: client-app/session-server/src/handlers/auth.rs
// ============================================================================
//! Login, current-session, profile, and logout handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use session_core::{RemoveOutcome, SessionData};
use session_security::PasswordCheck;
use tower_cookies::Cookies;
use tracing::info;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::users::DemoUser;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

/// User DTO for responses
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl From<&DemoUser> for UserDto {
    fn from(user: &DemoUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// Login handler - POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".into()));
    }

    let user = state
        .users
        .find_by_email(&payload.email)
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

    let valid = state
        .sessions
        .compare_password(PasswordCheck {
            password: &payload.password,
            salt: &user.salt,
            hashed_password: &user.password_hash,
        })
        .await?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    state.sessions.create(&user, &cookies).await?;
    info!(user_id = user.id, "login successful");
    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}

/// Current session - GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, cookies: Cookies) -> Result<Json<ApiResponse<SessionData>>, ApiError> {
    let session = state
        .sessions
        .read(&cookies)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("No active session".into()))?;
    Ok(Json(ApiResponse::success(session)))
}

/// Profile update handler - PUT /api/v1/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let display_name = payload.display_name.trim();
    if display_name.chars().count() < 2 {
        return Err(ApiError::BadRequest("Display name must be at least 2 characters".into()));
    }

    let user_id = state
        .sessions
        .read(&cookies)
        .await?
        .and_then(|session| session.get_i64("id"))
        .ok_or_else(|| ApiError::Unauthorized("No active session".into()))?;

    let user = state
        .users
        .update_display_name(user_id, display_name)
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".into()))?;

    state.sessions.update(&user, &cookies).await?;
    Ok(Json(ApiResponse::success(UserDto::from(&user))))
}

/// Logout handler - POST /api/v1/auth/logout
pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Result<Json<ApiResponse<()>>, ApiError> {
    let message = match state.sessions.remove(&cookies).await? {
        RemoveOutcome::Removed => "Logged out successfully",
        RemoveOutcome::NoActiveSession => "No active session",
    };
    Ok(Json(ApiResponse::success_with_message((), message)))
}
