//! Course Repository
//!
//! Handles all database operations related to courses, including the
//! ownership check gating batch submission and the summary write-back
//! performed when a batch task completes.

use recap_core::domain::course::{Course, CourseStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new course owned by a user
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    description: &str,
) -> Result<Course, sqlx::Error> {
    let course = Course {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_string(),
        description: description.to_string(),
        ai_summary: String::new(),
        status: CourseStatus::Pending,
        created_at: chrono::Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO courses (id, user_id, title, description, ai_summary, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(course.id)
    .bind(course.user_id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(&course.ai_summary)
    .bind(status_to_string(course.status))
    .bind(course.created_at)
    .execute(pool)
    .await?;

    Ok(course)
}

/// Find a course by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
    let row = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT id, user_id, title, description, ai_summary, status, created_at
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find a course by ID, scoped to its owner
pub async fn find_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Course>, sqlx::Error> {
    let row = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT id, user_id, title, description, ai_summary, status, created_at
        FROM courses
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List all courses owned by a user
pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Course>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CourseRow>(
        r#"
        SELECT id, user_id, title, description, ai_summary, status, created_at
        FROM courses
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Check whether a course exists and belongs to the given user
///
/// Pre-condition gate for batch submission. No side effects.
pub async fn is_owned_by(
    pool: &PgPool,
    course_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM courses WHERE id = $1 AND user_id = $2")
            .bind(course_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(row.is_some())
}

/// Write a generated summary onto a course and mark it Draft
pub async fn apply_summary(
    pool: &PgPool,
    course_id: Uuid,
    summary: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE courses
        SET ai_summary = $1, status = $2
        WHERE id = $3
        "#,
    )
    .bind(summary)
    .bind(status_to_string(CourseStatus::Draft))
    .bind(course_id)
    .execute(pool)
    .await?;

    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn status_to_string(status: CourseStatus) -> &'static str {
    match status {
        CourseStatus::Pending => "Pending",
        CourseStatus::Draft => "Draft",
    }
}

fn string_to_status(s: &str) -> CourseStatus {
    match s {
        "Draft" => CourseStatus::Draft,
        _ => CourseStatus::Pending,
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    ai_summary: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            ai_summary: row.ai_summary,
            status: string_to_status(&row.status),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [CourseStatus::Pending, CourseStatus::Draft] {
            assert_eq!(string_to_status(status_to_string(status)), status);
        }
    }
}
