//! Batch API Handlers
//!
//! HTTP endpoints for batch job submission and progress polling.

use axum::{
    Json,
    extract::{Path, State},
};
use recap_core::domain::batch::BatchTask;
use recap_core::dto::batch::{BatchJobProgress, CreateBatchJob};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::CurrentUser;
use crate::service::batch_service;
use crate::state::AppState;

fn map_batch_error(e: batch_service::BatchError) -> ApiError {
    match e {
        batch_service::BatchError::NotFound(id) => {
            ApiError::NotFound(format!("Batch job {} not found", id))
        }
        batch_service::BatchError::TaskNotFound(id) => {
            ApiError::NotFound(format!("Batch task {} not found", id))
        }
        batch_service::BatchError::CourseNotOwned(id) => {
            ApiError::Forbidden(format!("Course {} does not belong to you", id))
        }
        batch_service::BatchError::InvalidState(msg) => ApiError::BadRequest(msg),
        batch_service::BatchError::ValidationError(msg) => ApiError::BadRequest(msg),
        batch_service::BatchError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}

/// POST /batch/create
/// Submit a new batch of courses to summarize
pub async fn create_batch_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateBatchJob>,
) -> ApiResult<Json<BatchJobProgress>> {
    tracing::info!(
        "Submitting batch of {} course(s) for user: {}",
        req.course_ids.len(),
        user.id
    );

    let job = batch_service::submit_batch(&state.pool, user.id, req)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(job.into()))
}

/// GET /batch/list
/// List the current user's batch jobs with progress
pub async fn list_batch_jobs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<BatchJobProgress>>> {
    tracing::debug!("Listing batch jobs for user: {}", user.id);

    let jobs = batch_service::list_jobs(&state.pool, user.id)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(jobs.into_iter().map(|j| j.into()).collect()))
}

/// GET /batch/{id}
/// Get one batch job with progress
pub async fn get_batch_job(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BatchJobProgress>> {
    tracing::debug!("Getting batch job: {}", id);

    let job = batch_service::get_job(&state.pool, id, user.id)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(job.into()))
}

/// GET /batch/{id}/tasks
/// List the tasks of one batch job
pub async fn get_batch_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<BatchTask>>> {
    tracing::debug!("Listing tasks for batch job: {}", id);

    let tasks = batch_service::list_tasks(&state.pool, id, user.id)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(tasks))
}
