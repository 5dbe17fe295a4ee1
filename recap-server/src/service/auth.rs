//! Auth Service
//!
//! Registration, credential checks, and access token issuance.

use recap_core::domain::user::User;
use recap_core::dto::user::{LoginRequest, RegisterUser, Token};
use sqlx::PgPool;

use crate::repository::user_repository;
use crate::security;
use crate::settings::Settings;

/// Service error type
#[derive(Debug)]
pub enum AuthError {
    EmailTaken(String),
    InvalidCredentials,
    InactiveUser,
    HashingError(String),
    TokenError(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::DatabaseError(err)
    }
}

/// Register a new user
pub async fn register(pool: &PgPool, req: RegisterUser) -> Result<User, AuthError> {
    if user_repository::find_by_email(pool, &req.email).await?.is_some() {
        return Err(AuthError::EmailTaken(req.email));
    }

    let hashed = security::hash_password(&req.password)
        .map_err(|e| AuthError::HashingError(e.to_string()))?;

    let user = user_repository::create(pool, &req.name, &req.email, &hashed).await?;

    tracing::info!("User registered: {}", user.id);

    Ok(user)
}

/// Verify credentials and issue an access token
pub async fn login(
    pool: &PgPool,
    settings: &Settings,
    req: LoginRequest,
) -> Result<Token, AuthError> {
    let user = user_repository::find_by_email(pool, &req.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !security::verify_password(&req.password, &user.hashed_password) {
        return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active {
        return Err(AuthError::InactiveUser);
    }

    let token = security::create_access_token(
        user.id,
        &settings.secret_key,
        settings.access_token_expire_minutes,
    )
    .map_err(|e| AuthError::TokenError(e.to_string()))?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Token::bearer(token))
}
