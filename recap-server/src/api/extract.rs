//! Request Extractors
//!
//! Authentication extractor resolving the bearer token to a user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use recap_core::domain::user::User;

use crate::api::error::ApiError;
use crate::repository::user_repository;
use crate::security;
use crate::state::AppState;

/// The authenticated user behind the request's bearer token
///
/// Handlers that need a principal take this as an argument; requests
/// without a valid token are rejected before the handler runs.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Forbidden("Could not validate credentials".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Forbidden("Could not validate credentials".to_string()))?;

        let claims = security::decode_access_token(token, &state.settings.secret_key)
            .map_err(|_| ApiError::Forbidden("Could not validate credentials".to_string()))?;

        let user = user_repository::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if !user.is_active {
            return Err(ApiError::BadRequest("Inactive user".to_string()));
        }

        Ok(CurrentUser(user))
    }
}
