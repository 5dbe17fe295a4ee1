//! Recap HTTP Client
//!
//! A simple, type-safe HTTP client for the Recap server's worker API.
//!
//! The worker uses this client to discover pending batch jobs, claim
//! work, and report terminal task outcomes.
//!
//! # Example
//!
//! ```no_run
//! use recap_client::ServerClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), recap_client::ClientError> {
//!     let client = ServerClient::new("http://localhost:8080");
//!
//!     let jobs = client.list_pending_jobs().await?;
//!     println!("{} job(s) pending", jobs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod batch;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Recap server API
#[derive(Debug, Clone)]
pub struct ServerClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ServerClient {
    /// Create a new server client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the server API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new server client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ServerClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ServerClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = ServerClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
