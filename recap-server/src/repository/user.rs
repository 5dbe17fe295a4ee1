//! User Repository
//!
//! Handles all database operations related to users.

use recap_core::domain::user::User;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user in the database
///
/// The password must already be hashed by the caller.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        hashed_password: hashed_password.to_string(),
        is_active: true,
        is_superuser: false,
        created_at: chrono::Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, hashed_password, is_active, is_superuser, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.is_active)
    .bind(user.is_superuser)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    Ok(user)
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, hashed_password, is_active, is_superuser, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find a user by email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, name, email, hashed_password, is_active, is_superuser, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    hashed_password: String,
    is_active: bool,
    is_superuser: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            hashed_password: row.hashed_password,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
            created_at: row.created_at,
        }
    }
}
