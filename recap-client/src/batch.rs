//! Batch worker API endpoints

use crate::ServerClient;
use crate::error::Result;
use recap_core::domain::batch::{BatchJob, BatchTask};
use recap_core::dto::batch::{CompleteTask, JobClaim, TaskClaim};
use uuid::Uuid;

impl ServerClient {
    // =============================================================================
    // Worker Lifecycle
    // =============================================================================

    /// List batch jobs waiting to be claimed
    pub async fn list_pending_jobs(&self) -> Result<Vec<BatchJob>> {
        let url = format!("{}/worker/job/list/pending", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// List executable tasks of already-claimed jobs
    pub async fn list_pending_tasks(&self) -> Result<Vec<BatchTask>> {
        let url = format!("{}/worker/task/list/pending", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Claim a pending job for fan-out
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The claim with the ids of the job's pending tasks
    pub async fn claim_job(&self, job_id: Uuid) -> Result<JobClaim> {
        let url = format!("{}/worker/job/claim/{}", self.base_url, job_id);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Claim a pending task for execution
    ///
    /// # Arguments
    /// * `task_id` - The task UUID
    ///
    /// # Returns
    /// The claim with the course content to summarize
    pub async fn claim_task(&self, task_id: Uuid) -> Result<TaskClaim> {
        let url = format!("{}/worker/task/claim/{}", self.base_url, task_id);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Report a task's terminal outcome
    ///
    /// # Arguments
    /// * `task_id` - The task UUID
    /// * `outcome` - Terminal status with result or error text
    pub async fn complete_task(&self, task_id: Uuid, outcome: CompleteTask) -> Result<()> {
        let url = format!("{}/worker/task/{}/complete", self.base_url, task_id);
        let response = self.client.post(&url).json(&outcome).send().await?;

        self.handle_empty_response(response).await
    }
}
