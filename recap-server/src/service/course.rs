//! Course Service
//!
//! Business logic for course management.

use recap_core::domain::course::Course;
use recap_core::dto::course::CreateCourse;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::course_repository;

/// Service error type
#[derive(Debug)]
pub enum CourseError {
    NotFound(Uuid),
    ValidationError(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for CourseError {
    fn from(err: sqlx::Error) -> Self {
        CourseError::DatabaseError(err)
    }
}

/// Create a new course owned by a user
pub async fn create_course(
    pool: &PgPool,
    user_id: Uuid,
    req: CreateCourse,
) -> Result<Course, CourseError> {
    if req.title.trim().is_empty() {
        return Err(CourseError::ValidationError(
            "title cannot be empty".to_string(),
        ));
    }

    let course = course_repository::create(pool, user_id, &req.title, &req.description).await?;

    tracing::info!("Course created: {} for user: {}", course.id, user_id);

    Ok(course)
}

/// Get a course by ID, scoped to its owner
pub async fn get_course(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Course, CourseError> {
    let course = course_repository::find_for_user(pool, id, user_id)
        .await?
        .ok_or(CourseError::NotFound(id))?;

    Ok(course)
}

/// List all courses owned by a user
pub async fn list_courses(pool: &PgPool, user_id: Uuid) -> Result<Vec<Course>, CourseError> {
    let courses = course_repository::list_by_user(pool, user_id).await?;
    Ok(courses)
}
