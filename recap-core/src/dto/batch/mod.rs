//! Batch DTOs for inter-service communication

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::batch::{BatchJob, BatchStatus};

/// Request to create a new batch job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBatchJob {
    pub name: String,
    pub course_ids: Vec<Uuid>,
}

/// Progress view of a batch job returned to polling clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJobProgress {
    pub id: Uuid,
    pub name: String,
    pub status: BatchStatus,
    pub total_tasks: i32,
    pub completed_tasks: i32,
    /// Fraction of tasks in a terminal state, 0.0 for an empty job
    pub progress: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<BatchJob> for BatchJobProgress {
    fn from(job: BatchJob) -> Self {
        let progress = if job.total_tasks > 0 {
            f64::from(job.completed_tasks) / f64::from(job.total_tasks)
        } else {
            0.0
        };

        BatchJobProgress {
            id: job.id,
            name: job.name,
            status: job.status,
            total_tasks: job.total_tasks,
            completed_tasks: job.completed_tasks,
            progress,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// Response to a worker claiming a pending job for fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobClaim {
    pub job_id: Uuid,
    /// Tasks still pending execution, in no guaranteed order
    pub task_ids: Vec<Uuid>,
}

/// Response to a worker claiming a single task for execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskClaim {
    pub task_id: Uuid,
    pub course_id: Uuid,
    /// Course description to summarize; None if the course no longer exists
    pub description: Option<String>,
}

/// Terminal outcome reported by the worker for one task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTask {
    pub status: BatchStatus,
    pub result: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(total: i32, completed: i32) -> BatchJob {
        let now = chrono::Utc::now();
        BatchJob {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "batch".to_string(),
            status: BatchStatus::Processing,
            total_tasks: total,
            completed_tasks: completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_progress_fraction() {
        let view = BatchJobProgress::from(job(4, 1));
        assert_eq!(view.progress, 0.25);

        let view = BatchJobProgress::from(job(3, 3));
        assert_eq!(view.progress, 1.0);
    }

    #[test]
    fn test_progress_empty_job_is_zero() {
        let view = BatchJobProgress::from(job(0, 0));
        assert_eq!(view.progress, 0.0);
    }
}
