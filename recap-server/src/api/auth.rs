//! Auth API Handlers
//!
//! HTTP endpoints for registration and login.

use axum::{Json, extract::State};
use recap_core::dto::user::{LoginRequest, RegisterUser, Token, UserPublic};

use crate::api::error::{ApiError, ApiResult};
use crate::service::auth_service;
use crate::state::AppState;

/// POST /auth/register
/// Register a new user account
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUser>,
) -> ApiResult<Json<UserPublic>> {
    tracing::info!("Registering user: {}", req.email);

    let user = auth_service::register(&state.pool, req)
        .await
        .map_err(|e| match e {
            auth_service::AuthError::EmailTaken(email) => {
                ApiError::BadRequest(format!("Email {} is already registered", email))
            }
            auth_service::AuthError::InvalidCredentials => {
                ApiError::Forbidden("Could not validate credentials".to_string())
            }
            auth_service::AuthError::InactiveUser => {
                ApiError::BadRequest("Inactive user".to_string())
            }
            auth_service::AuthError::HashingError(msg) => ApiError::InternalError(msg),
            auth_service::AuthError::TokenError(msg) => ApiError::InternalError(msg),
            auth_service::AuthError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(user.into()))
}

/// POST /auth/login
/// Verify credentials and issue an access token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Token>> {
    tracing::debug!("Login attempt: {}", req.email);

    let token = auth_service::login(&state.pool, &state.settings, req)
        .await
        .map_err(|e| match e {
            auth_service::AuthError::InvalidCredentials => {
                ApiError::Forbidden("Incorrect email or password".to_string())
            }
            auth_service::AuthError::InactiveUser => {
                ApiError::BadRequest("Inactive user".to_string())
            }
            auth_service::AuthError::EmailTaken(email) => {
                ApiError::BadRequest(format!("Email {} is already registered", email))
            }
            auth_service::AuthError::HashingError(msg) => ApiError::InternalError(msg),
            auth_service::AuthError::TokenError(msg) => ApiError::InternalError(msg),
            auth_service::AuthError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(token))
}
