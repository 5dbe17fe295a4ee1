//! Course API Handlers
//!
//! HTTP endpoints for course management.

use axum::{
    Json,
    extract::{Path, State},
};
use recap_core::domain::course::Course;
use recap_core::dto::course::{CoursesPublic, CreateCourse};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::service::course_service;
use crate::state::AppState;

/// POST /course/create
/// Create a new course owned by the current user
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateCourse>,
) -> ApiResult<Json<Course>> {
    tracing::info!("Creating course for user: {}", user.id);

    let course = course_service::create_course(&state.pool, user.id, req)
        .await
        .map_err(|e| match e {
            course_service::CourseError::ValidationError(msg) => ApiError::BadRequest(msg),
            course_service::CourseError::NotFound(id) => {
                ApiError::NotFound(format!("Course {} not found", id))
            }
            course_service::CourseError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(course))
}

/// GET /course/list
/// List the current user's courses
pub async fn list_courses(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<CoursesPublic>> {
    tracing::debug!("Listing courses for user: {}", user.id);

    let courses = course_service::list_courses(&state.pool, user.id)
        .await
        .map_err(|e| match e {
            course_service::CourseError::ValidationError(msg) => ApiError::BadRequest(msg),
            course_service::CourseError::NotFound(id) => {
                ApiError::NotFound(format!("Course {} not found", id))
            }
            course_service::CourseError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(CoursesPublic { courses }))
}

/// GET /course/{id}
/// Get one of the current user's courses by ID
pub async fn get_course(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Course>> {
    tracing::debug!("Getting course: {}", id);

    let course = course_service::get_course(&state.pool, id, user.id)
        .await
        .map_err(|e| match e {
            course_service::CourseError::NotFound(id) => {
                ApiError::NotFound(format!("Course {} not found", id))
            }
            course_service::CourseError::ValidationError(msg) => ApiError::BadRequest(msg),
            course_service::CourseError::DatabaseError(err) => ApiError::DatabaseError(err),
        })?;

    Ok(Json(course))
}
