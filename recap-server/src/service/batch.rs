//! Batch Service
//!
//! Business logic for batch job submission, progress reads, and the
//! worker-facing claim/complete lifecycle.
//!
//! Submission is the single creation path: ownership of every course is
//! validated first, then the job and its tasks are created atomically and
//! returned Pending. Fan-out happens asynchronously when a worker claims
//! the job. Recording a task outcome and recomputing job progress are two
//! explicit steps here rather than a hidden cascade inside the repository.

use recap_core::domain::batch::{BatchJob, BatchStatus, BatchTask};
use recap_core::dto::batch::{CompleteTask, CreateBatchJob, JobClaim, TaskClaim};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{batch_repository, course_repository};

/// Service error type
#[derive(Debug)]
pub enum BatchError {
    NotFound(Uuid),
    TaskNotFound(Uuid),
    CourseNotOwned(Uuid),
    InvalidState(String),
    ValidationError(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for BatchError {
    fn from(err: sqlx::Error) -> Self {
        BatchError::DatabaseError(err)
    }
}

// =============================================================================
// Submission and Progress Reads
// =============================================================================

/// Validate ownership of every course and create the job with its tasks
///
/// Rejects the whole batch on the first course that is missing or foreign;
/// nothing is created in that case.
pub async fn submit_batch(
    pool: &PgPool,
    user_id: Uuid,
    req: CreateBatchJob,
) -> Result<BatchJob, BatchError> {
    if req.course_ids.is_empty() {
        return Err(BatchError::ValidationError(
            "batch must contain at least one course".to_string(),
        ));
    }

    for &course_id in &req.course_ids {
        if !course_repository::is_owned_by(pool, course_id, user_id).await? {
            return Err(BatchError::CourseNotOwned(course_id));
        }
    }

    let job = batch_repository::create_job(pool, user_id, &req.name, &req.course_ids).await?;

    tracing::info!(
        "Batch job created: {} with {} task(s) for user: {}",
        job.id,
        job.total_tasks,
        user_id
    );

    Ok(job)
}

/// Get a job by ID, scoped to its owner
pub async fn get_job(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> Result<BatchJob, BatchError> {
    let job = batch_repository::find_job_for_user(pool, job_id, user_id)
        .await?
        .ok_or(BatchError::NotFound(job_id))?;

    Ok(job)
}

/// List all jobs owned by a user
pub async fn list_jobs(pool: &PgPool, user_id: Uuid) -> Result<Vec<BatchJob>, BatchError> {
    let jobs = batch_repository::list_jobs_by_user(pool, user_id).await?;
    Ok(jobs)
}

/// List the tasks of a job, authorizing through the owner-scoped job lookup
pub async fn list_tasks(
    pool: &PgPool,
    job_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<BatchTask>, BatchError> {
    let _job = batch_repository::find_job_for_user(pool, job_id, user_id)
        .await?
        .ok_or(BatchError::NotFound(job_id))?;

    let tasks = batch_repository::list_tasks(pool, job_id).await?;
    Ok(tasks)
}

// =============================================================================
// Worker Lifecycle
// =============================================================================

/// List jobs waiting to be claimed by a worker
pub async fn list_pending_jobs(pool: &PgPool) -> Result<Vec<BatchJob>, BatchError> {
    let jobs = batch_repository::list_jobs_by_status(pool, BatchStatus::Pending).await?;
    Ok(jobs)
}

/// List tasks waiting to be executed, across all claimed jobs
///
/// Tasks a worker could not dispatch in the cycle that claimed their job
/// (pool at capacity) surface here on later cycles.
pub async fn list_pending_tasks(pool: &PgPool) -> Result<Vec<BatchTask>, BatchError> {
    let tasks = batch_repository::list_runnable_tasks(pool).await?;
    Ok(tasks)
}

/// Claim a pending job for fan-out
///
/// Transitions the job Pending -> Processing and returns the ids of its
/// tasks still pending execution.
pub async fn claim_job(pool: &PgPool, job_id: Uuid) -> Result<JobClaim, BatchError> {
    let job = batch_repository::find_job(pool, job_id)
        .await?
        .ok_or(BatchError::NotFound(job_id))?;

    if job.status != BatchStatus::Pending {
        return Err(BatchError::InvalidState(format!(
            "Job {} is not in Pending state (current: {:?})",
            job_id, job.status
        )));
    }

    batch_repository::update_job_status(pool, job_id, BatchStatus::Processing).await?;

    let task_ids = batch_repository::list_tasks(pool, job_id)
        .await?
        .into_iter()
        .filter(|t| t.status == BatchStatus::Pending)
        .map(|t| t.id)
        .collect();

    tracing::info!("Job {} claimed for processing", job_id);

    Ok(JobClaim { job_id, task_ids })
}

/// Claim a pending task for execution
///
/// Transitions the task Pending -> Processing and returns the course
/// content to summarize. A missing course is reported through
/// `description: None` so the worker can record the failure instead of
/// crashing.
pub async fn claim_task(pool: &PgPool, task_id: Uuid) -> Result<TaskClaim, BatchError> {
    let task = batch_repository::find_task(pool, task_id)
        .await?
        .ok_or(BatchError::TaskNotFound(task_id))?;

    if task.status != BatchStatus::Pending {
        return Err(BatchError::InvalidState(format!(
            "Task {} is not in Pending state (current: {:?})",
            task_id, task.status
        )));
    }

    batch_repository::update_task_status(pool, task_id, BatchStatus::Processing, None, None)
        .await?;

    let description = course_repository::find_by_id(pool, task.course_id)
        .await?
        .map(|course| course.description);

    tracing::info!("Task {} claimed for execution", task_id);

    Ok(TaskClaim {
        task_id,
        course_id: task.course_id,
        description,
    })
}

/// Record a task's terminal outcome and recompute the parent aggregate
///
/// On success the summary is also written onto the referenced course.
/// Aggregation is the explicit second step: it re-counts terminal
/// siblings, so racing completions of the same job stay consistent.
pub async fn complete_task(
    pool: &PgPool,
    task_id: Uuid,
    req: CompleteTask,
) -> Result<BatchTask, BatchError> {
    validate_terminal_status(req.status)?;

    let task = batch_repository::update_task_status(
        pool,
        task_id,
        req.status,
        req.result.as_deref(),
        req.error.as_deref(),
    )
    .await?
    .ok_or(BatchError::TaskNotFound(task_id))?;

    if req.status == BatchStatus::Completed {
        if let Some(summary) = &req.result {
            course_repository::apply_summary(pool, task.course_id, summary).await?;
        }
    }

    batch_repository::recompute_job_progress(pool, task.batch_job_id).await?;

    tracing::info!(
        "Task {} completed with status: {:?}",
        task_id,
        req.status
    );

    Ok(task)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_terminal_status(status: BatchStatus) -> Result<(), BatchError> {
    if status.is_terminal() {
        Ok(())
    } else {
        Err(BatchError::ValidationError(format!(
            "Invalid completion status: {:?}",
            status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_terminal_status_valid() {
        assert!(validate_terminal_status(BatchStatus::Completed).is_ok());
        assert!(validate_terminal_status(BatchStatus::Failed).is_ok());
    }

    #[test]
    fn test_validate_terminal_status_invalid() {
        assert!(validate_terminal_status(BatchStatus::Pending).is_err());
        assert!(validate_terminal_status(BatchStatus::Processing).is_err());
    }
}
