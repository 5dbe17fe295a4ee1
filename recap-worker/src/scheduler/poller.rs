//! Batch poller
//!
//! Polls the server for pending jobs and tasks and executes them.
//! Claiming a job is the fan-out step: it flips the job to Processing and
//! exposes its tasks, which are then dispatched individually. Each task
//! runs in its own tokio task, bounded by a semaphore.

use anyhow::{Context as AnyhowContext, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::executor;
use crate::llm::Summarizer;
use recap_client::ServerClient;

/// Poller that continuously fetches and executes batch tasks
pub struct BatchPoller {
    config: Config,
    client: Arc<ServerClient>,
    summarizer: Arc<dyn Summarizer>,
    semaphore: Arc<Semaphore>,
}

impl BatchPoller {
    /// Creates a new batch poller
    pub fn new(
        config: Config,
        client: Arc<ServerClient>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_parallel_tasks));
        Self {
            config,
            client,
            summarizer,
            semaphore,
        }
    }

    /// Starts the polling loop
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting batch poller {} (interval: {:?})",
            self.config.worker_id, self.config.poll_interval
        );

        let mut interval = time::interval(self.config.poll_interval);

        loop {
            interval.tick().await;

            debug!("Polling for pending work");

            match self.poll_and_execute_once().await {
                Ok(executed) => {
                    if executed > 0 {
                        info!("Executed {} task(s) this cycle", executed);
                    }
                }
                Err(e) => {
                    error!("Error during poll cycle: {:#}", e);
                }
            }
        }
    }

    /// Performs a single poll cycle
    async fn poll_and_execute_once(&self) -> Result<usize> {
        // Fan-out: claim newly submitted jobs so their tasks become runnable
        let jobs = self
            .client
            .list_pending_jobs()
            .await
            .context("Failed to fetch pending jobs")?;

        for job in jobs {
            match self.client.claim_job(job.id).await {
                Ok(claim) => {
                    info!(
                        "Claimed job {} with {} task(s)",
                        claim.job_id,
                        claim.task_ids.len()
                    );
                }
                // Another worker may have claimed it between list and claim
                Err(e) => warn!("Failed to claim job {}: {:#}", job.id, e),
            }
        }

        let tasks = self
            .client
            .list_pending_tasks()
            .await
            .context("Failed to fetch pending tasks")?;

        if tasks.is_empty() {
            debug!("No tasks available");
            return Ok(0);
        }

        info!("Found {} task(s) to execute", tasks.len());

        let mut handles = Vec::new();

        for task in tasks {
            let task_id = task.id;

            // Try to acquire semaphore permit, skip if at max capacity;
            // skipped tasks stay Pending and surface on a later cycle
            if let Ok(permit) = self.semaphore.clone().try_acquire_owned() {
                let handle = self.spawn_task(task_id, permit);
                handles.push(handle);
            } else {
                debug!(
                    "Max parallel tasks reached, skipping task {} for now",
                    task_id
                );
            }
        }

        let num_tasks = handles.len();

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Task execution panicked: {}", e);
            }
        }

        Ok(num_tasks)
    }

    /// Spawns a tokio task to execute a single batch task
    fn spawn_task(
        &self,
        task_id: Uuid,
        permit: tokio::sync::OwnedSemaphorePermit,
    ) -> tokio::task::JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let summarizer = Arc::clone(&self.summarizer);

        tokio::spawn(async move {
            // Hold the permit for the lifetime of the execution
            let _permit = permit;

            if let Err(e) = executor::execute_task(&client, summarizer.as_ref(), task_id).await {
                error!("Failed to execute task {}: {:#}", task_id, e);
            }
        })
    }
}
