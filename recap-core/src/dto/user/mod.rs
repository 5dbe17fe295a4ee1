//! User and authentication DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::User;

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credential payload for login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user, safe to return from the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        UserPublic {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// JSON payload containing an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Token {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
