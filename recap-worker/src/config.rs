//! Worker configuration
//!
//! Defines all configurable parameters for the worker including
//! polling interval, parallelism, and the LLM request timeout.

use std::time::Duration;

/// Worker configuration
///
/// All timeouts and intervals are configurable to allow tuning
/// for different deployment scenarios.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unique identifier for this worker instance
    pub worker_id: String,

    /// Server base URL (e.g., "http://localhost:8080")
    pub server_url: String,

    /// API key for the LLM provider
    pub openai_api_key: String,

    /// How often to poll the server for new work
    pub poll_interval: Duration,

    /// Max tasks executing concurrently in this worker
    pub max_parallel_tasks: usize,

    /// Upper bound on a single LLM request
    pub llm_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - WORKER_ID (required)
    /// - SERVER_URL (required)
    /// - OPENAI_API_KEY (required)
    /// - POLL_INTERVAL (optional, seconds, default: 5)
    /// - MAX_PARALLEL_TASKS (optional, default: 4)
    /// - LLM_TIMEOUT (optional, seconds, default: 60)
    pub fn from_env() -> anyhow::Result<Self> {
        let worker_id = std::env::var("WORKER_ID")
            .map_err(|_| anyhow::anyhow!("WORKER_ID environment variable not set"))?;

        let server_url = std::env::var("SERVER_URL")
            .map_err(|_| anyhow::anyhow!("SERVER_URL environment variable not set"))?;

        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let poll_interval = std::env::var("POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let max_parallel_tasks = std::env::var("MAX_PARALLEL_TASKS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(4);

        let llm_timeout = std::env::var("LLM_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        Ok(Self {
            worker_id,
            server_url,
            openai_api_key,
            poll_interval,
            max_parallel_tasks,
            llm_timeout,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.worker_id.is_empty() {
            anyhow::bail!("worker_id cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.openai_api_key.is_empty() {
            anyhow::bail!("openai_api_key cannot be empty");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_parallel_tasks == 0 {
            anyhow::bail!("max_parallel_tasks must be greater than 0");
        }

        if self.llm_timeout.as_secs() == 0 {
            anyhow::bail!("llm_timeout must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            worker_id: "worker-1".to_string(),
            server_url: "http://localhost:8080".to_string(),
            openai_api_key: "sk-test".to_string(),
            poll_interval: Duration::from_secs(5),
            max_parallel_tasks: 4,
            llm_timeout: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut c = config();
        assert!(c.validate().is_ok());

        c.worker_id = String::new();
        assert!(c.validate().is_err());

        c.worker_id = "worker-1".to_string();
        c.server_url = "not-a-url".to_string();
        assert!(c.validate().is_err());

        c.server_url = "http://localhost:8080".to_string();
        c.max_parallel_tasks = 0;
        assert!(c.validate().is_err());
    }
}
