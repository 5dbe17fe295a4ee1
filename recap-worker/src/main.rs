use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod executor;
mod llm;
mod scheduler;

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{OpenAiSummarizer, Summarizer};
use crate::scheduler::poller::BatchPoller;
use recap_client::ServerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recap_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Recap worker...");

    let config = Config::from_env()?;
    config.validate()?;

    let client = Arc::new(ServerClient::new(&config.server_url));

    let summarizer: Arc<dyn Summarizer> =
        Arc::new(OpenAiSummarizer::new(&config.openai_api_key, config.llm_timeout)?);

    let poller = BatchPoller::new(config, client, summarizer);
    poller.run().await
}
