//! Worker API Handlers
//!
//! HTTP endpoints for the out-of-process worker: discovering pending
//! jobs, claiming work, and reporting terminal task outcomes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use recap_core::domain::batch::{BatchJob, BatchTask};
use recap_core::dto::batch::{CompleteTask, JobClaim, TaskClaim};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
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

/// GET /worker/job/list/pending
/// List jobs waiting to be claimed
pub async fn list_pending_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<BatchJob>>> {
    tracing::debug!("Listing pending batch jobs");

    let jobs = batch_service::list_pending_jobs(&state.pool)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(jobs))
}

/// GET /worker/task/list/pending
/// List executable tasks of already-claimed jobs
pub async fn list_pending_tasks(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BatchTask>>> {
    tracing::debug!("Listing pending batch tasks");

    let tasks = batch_service::list_pending_tasks(&state.pool)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(tasks))
}

/// POST /worker/job/claim/{id}
/// Claim a pending job for fan-out
pub async fn claim_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<JobClaim>> {
    tracing::info!("Worker claiming job: {}", id);

    let claim = batch_service::claim_job(&state.pool, id)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(claim))
}

/// POST /worker/task/claim/{id}
/// Claim a pending task for execution
pub async fn claim_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskClaim>> {
    tracing::info!("Worker claiming task: {}", id);

    let claim = batch_service::claim_task(&state.pool, id)
        .await
        .map_err(map_batch_error)?;

    Ok(Json(claim))
}

/// POST /worker/task/{id}/complete
/// Record a task's terminal outcome and update job progress
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteTask>,
) -> ApiResult<StatusCode> {
    tracing::info!("Completing task: {} with status {:?}", id, req.status);

    batch_service::complete_task(&state.pool, id, req)
        .await
        .map_err(map_batch_error)?;

    Ok(StatusCode::NO_CONTENT)
}
