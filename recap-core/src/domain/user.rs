//! User domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Never leaves the server in API responses
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
