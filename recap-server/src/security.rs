//! Password hashing and access token issuance
//!
//! Argon2 for password storage, HS256 JWTs for API access.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: Uuid,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match PasswordHash::new(hashed) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Issue an access token for a user
pub fn create_access_token(
    user_id: Uuid,
    secret: &str,
    expire_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(expire_minutes)).timestamp();
    let claims = Claims { sub: user_id, exp };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate an access token and return its claims
///
/// Rejects tampered and expired tokens.
pub fn decode_access_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-tokens";

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, SECRET, 60).unwrap();
        let claims = decode_access_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_access_token(Uuid::new_v4(), SECRET, 60).unwrap();
        assert!(decode_access_token(&token, "a-different-secret").is_err());
    }

    #[test]
    fn test_token_rejects_expired() {
        let token = create_access_token(Uuid::new_v4(), SECRET, -5).unwrap();
        assert!(decode_access_token(&token, SECRET).is_err());
    }
}
