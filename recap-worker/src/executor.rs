//! Task executor
//!
//! Runs one batch task end to end: claim it, summarize the course,
//! report the terminal outcome. Summarization failures never leave this
//! module as errors; they become a Failed outcome so the job's progress
//! still advances and the failure stays visible to polling clients.

use anyhow::{Context, Result};
use recap_client::ServerClient;
use recap_core::domain::batch::BatchStatus;
use recap_core::dto::batch::CompleteTask;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::llm::Summarizer;

/// Executes a single task
pub async fn execute_task(
    client: &ServerClient,
    summarizer: &dyn Summarizer,
    task_id: Uuid,
) -> Result<()> {
    info!("Starting execution of task {}", task_id);

    // Claim the task (marks it Processing server-side)
    let claim = client
        .claim_task(task_id)
        .await
        .context("Failed to claim task")?;

    let outcome = match claim.description {
        None => {
            let message = missing_course_error(claim.course_id);
            warn!("Task {}: {}", task_id, message);
            CompleteTask {
                status: BatchStatus::Failed,
                result: None,
                error: Some(message),
            }
        }
        Some(description) => match summarizer.summarize(&description).await {
            Ok(summary) => CompleteTask {
                status: BatchStatus::Completed,
                result: Some(summary),
                error: None,
            },
            Err(e) => {
                error!("Task {}: summarization failed: {}", task_id, e);
                CompleteTask {
                    status: BatchStatus::Failed,
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        },
    };

    let status = outcome.status;

    // Report the terminal outcome; this triggers job aggregation
    client
        .complete_task(task_id, outcome)
        .await
        .context("Failed to complete task")?;

    info!("Task {} finished with status: {:?}", task_id, status);

    Ok(())
}

fn missing_course_error(course_id: Uuid) -> String {
    format!("Course {} not found", course_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_course_error_format() {
        let id = Uuid::nil();
        assert_eq!(
            missing_course_error(id),
            format!("Course {} not found", id)
        );
    }
}
