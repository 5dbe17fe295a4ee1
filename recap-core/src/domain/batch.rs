//! Batch job and task domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parent record for a user-submitted batch of courses to summarize
///
/// Structure shared between server (persists) and worker (drives progress).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub status: BatchStatus,
    /// Number of tasks created with the job, fixed at creation
    pub total_tasks: i32,
    /// Count of tasks in a terminal state, recomputed from the task table
    pub completed_tasks: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// One unit of work within a batch job, corresponding to one course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchTask {
    pub id: Uuid,
    pub batch_job_id: Uuid,
    pub course_id: Uuid,
    pub status: BatchStatus,
    /// Summary text, populated only on Completed
    pub result: Option<String>,
    /// Failure description, populated only on Failed
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Lifecycle status shared by jobs and tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl BatchStatus {
    /// Completed and Failed are terminal: no further transitions occur
    pub fn is_terminal(self) -> bool {
        matches!(self, BatchStatus::Completed | BatchStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(BatchStatus::Completed.is_terminal());
        assert!(BatchStatus::Failed.is_terminal());
        assert!(!BatchStatus::Pending.is_terminal());
        assert!(!BatchStatus::Processing.is_terminal());
    }
}
