//! Batch Repository
//!
//! Handles all database operations related to batch jobs and their tasks.
//!
//! Job progress is never incremented in place: `recompute_job_progress`
//! re-counts terminal tasks from the task table in a single atomic UPDATE,
//! so concurrent completions from several workers converge on the correct
//! aggregate.

use recap_core::domain::batch::{BatchJob, BatchStatus, BatchTask};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new batch job and one pending task per course
///
/// The job row and all task rows are written in a single transaction:
/// either the whole batch exists or none of it does.
pub async fn create_job(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    course_ids: &[Uuid],
) -> Result<BatchJob, sqlx::Error> {
    let now = chrono::Utc::now();

    let job = BatchJob {
        id: Uuid::new_v4(),
        user_id,
        name: name.to_string(),
        status: BatchStatus::Pending,
        total_tasks: course_ids.len() as i32,
        completed_tasks: 0,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO batch_jobs (id, user_id, name, status, total_tasks, completed_tasks,
                                created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(job.id)
    .bind(job.user_id)
    .bind(&job.name)
    .bind(status_to_string(job.status))
    .bind(job.total_tasks)
    .bind(job.completed_tasks)
    .bind(job.created_at)
    .bind(job.updated_at)
    .execute(&mut *tx)
    .await?;

    for &course_id in course_ids {
        sqlx::query(
            r#"
            INSERT INTO batch_tasks (id, batch_job_id, course_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job.id)
        .bind(course_id)
        .bind(status_to_string(BatchStatus::Pending))
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(job)
}

/// Find a job by ID
pub async fn find_job(pool: &PgPool, id: Uuid) -> Result<Option<BatchJob>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, user_id, name, status, total_tasks, completed_tasks, created_at, updated_at
        FROM batch_jobs
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find a job by ID, scoped to its owner
///
/// Foreign jobs are indistinguishable from missing ones.
pub async fn find_job_for_user(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<BatchJob>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, user_id, name, status, total_tasks, completed_tasks, created_at, updated_at
        FROM batch_jobs
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List all jobs owned by a user
pub async fn list_jobs_by_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<BatchJob>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, user_id, name, status, total_tasks, completed_tasks, created_at, updated_at
        FROM batch_jobs
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// List jobs by status
pub async fn list_jobs_by_status(
    pool: &PgPool,
    status: BatchStatus,
) -> Result<Vec<BatchJob>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, user_id, name, status, total_tasks, completed_tasks, created_at, updated_at
        FROM batch_jobs
        WHERE status = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(status_to_string(status))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Update job status, bumping updated_at
pub async fn update_job_status(
    pool: &PgPool,
    job_id: Uuid,
    status: BatchStatus,
) -> Result<Option<BatchJob>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE batch_jobs
        SET status = $1, updated_at = $2
        WHERE id = $3
        "#,
    )
    .bind(status_to_string(status))
    .bind(chrono::Utc::now())
    .bind(job_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_job(pool, job_id).await
}

/// Find a task by ID
pub async fn find_task(pool: &PgPool, id: Uuid) -> Result<Option<BatchTask>, sqlx::Error> {
    let row = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, batch_job_id, course_id, status, result, error, created_at, updated_at
        FROM batch_tasks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List all tasks for a job
///
/// Unscoped by owner: callers must have already authorized via the job.
pub async fn list_tasks(pool: &PgPool, job_id: Uuid) -> Result<Vec<BatchTask>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT id, batch_job_id, course_id, status, result, error, created_at, updated_at
        FROM batch_tasks
        WHERE batch_job_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// List pending tasks whose parent job has already been claimed
///
/// The worker polls this to pick up tasks left behind by earlier cycles.
/// Tasks of still-Pending jobs are excluded; those are handed out through
/// the job claim.
pub async fn list_runnable_tasks(pool: &PgPool) -> Result<Vec<BatchTask>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TaskRow>(
        r#"
        SELECT t.id, t.batch_job_id, t.course_id, t.status, t.result, t.error,
               t.created_at, t.updated_at
        FROM batch_tasks t
        JOIN batch_jobs j ON j.id = t.batch_job_id
        WHERE t.status = 'Pending' AND j.status = 'Processing'
        ORDER BY t.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Update task status, optionally setting result or error
///
/// A field passed as None keeps its stored value, so recording a failure
/// never clears an earlier result and vice versa. Aggregation is NOT
/// triggered here; callers follow up with `recompute_job_progress`.
pub async fn update_task_status(
    pool: &PgPool,
    task_id: Uuid,
    status: BatchStatus,
    result: Option<&str>,
    error: Option<&str>,
) -> Result<Option<BatchTask>, sqlx::Error> {
    let outcome = sqlx::query(
        r#"
        UPDATE batch_tasks
        SET status = $1,
            result = COALESCE($2, result),
            error = COALESCE($3, error),
            updated_at = $4
        WHERE id = $5
        "#,
    )
    .bind(status_to_string(status))
    .bind(result)
    .bind(error)
    .bind(chrono::Utc::now())
    .bind(task_id)
    .execute(pool)
    .await?;

    if outcome.rows_affected() == 0 {
        return Ok(None);
    }

    find_task(pool, task_id).await
}

/// Recompute a job's completed_tasks from its tasks' terminal states
///
/// Counts siblings in {Completed, Failed} and flips the job to Completed
/// once the count reaches total_tasks. The count and the write happen in
/// one UPDATE statement, so a concurrent completion cannot tear the
/// aggregate; whichever invocation lands last re-counts everything.
/// No-op if the job is missing. Idempotent.
pub async fn recompute_job_progress(pool: &PgPool, job_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE batch_jobs
        SET completed_tasks = done.count,
            status = CASE
                WHEN total_tasks > 0 AND done.count >= total_tasks THEN 'Completed'
                ELSE status
            END,
            updated_at = $2
        FROM (
            SELECT COUNT(*)::INT AS count
            FROM batch_tasks
            WHERE batch_job_id = $1 AND status IN ('Completed', 'Failed')
        ) AS done
        WHERE id = $1
        "#,
    )
    .bind(job_id)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

// =============================================================================
// Helper Functions
// =============================================================================

fn status_to_string(status: BatchStatus) -> &'static str {
    match status {
        BatchStatus::Pending => "Pending",
        BatchStatus::Processing => "Processing",
        BatchStatus::Completed => "Completed",
        BatchStatus::Failed => "Failed",
    }
}

fn string_to_status(s: &str) -> BatchStatus {
    match s {
        "Processing" => BatchStatus::Processing,
        "Completed" => BatchStatus::Completed,
        "Failed" => BatchStatus::Failed,
        _ => BatchStatus::Pending,
    }
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    status: String,
    total_tasks: i32,
    completed_tasks: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<JobRow> for BatchJob {
    fn from(row: JobRow) -> Self {
        BatchJob {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            status: string_to_status(&row.status),
            total_tasks: row.total_tasks,
            completed_tasks: row.completed_tasks,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    batch_job_id: Uuid,
    course_id: Uuid,
    status: String,
    result: Option<String>,
    error: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<TaskRow> for BatchTask {
    fn from(row: TaskRow) -> Self {
        BatchTask {
            id: row.id,
            batch_job_id: row.batch_job_id,
            course_id: row.course_id,
            status: string_to_status(&row.status),
            result: row.result,
            error: row.error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            BatchStatus::Pending,
            BatchStatus::Processing,
            BatchStatus::Completed,
            BatchStatus::Failed,
        ] {
            assert_eq!(string_to_status(status_to_string(status)), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_pending() {
        assert_eq!(string_to_status("Bogus"), BatchStatus::Pending);
    }
}
