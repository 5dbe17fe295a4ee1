//! LLM collaborator
//!
//! The `Summarizer` trait is the seam between task execution and the
//! model provider; the OpenAI adapter is the production implementation
//! and tests substitute a fake with no network access.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-4o-mini-2024-07-18";
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that creates concise, informative summaries of online courses.";

/// Errors from the LLM collaborator
///
/// The executor catches every variant and records it as a failed task;
/// nothing here propagates past the execution boundary.
#[derive(Debug, Error)]
pub enum SummarizerError {
    /// HTTP request failed (connection, timeout)
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Provider returned an error status code
    #[error("LLM API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body from the provider
        message: String,
    },

    /// Response did not contain a usable completion
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}

/// Capability interface for text summarization
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate a summary of the given course description
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;
}

/// OpenAI chat-completions implementation of `Summarizer`
pub struct OpenAiSummarizer {
    client: Client,
    api_base: String,
    api_key: String,
}

impl OpenAiSummarizer {
    /// Create an adapter against the default OpenAI endpoint
    ///
    /// Every request is bounded by `timeout`; a hung upstream call
    /// surfaces as `RequestFailed` instead of hanging the worker.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, SummarizerError> {
        Self::with_api_base(DEFAULT_API_BASE, api_key, timeout)
    }

    /// Create an adapter against a custom API base URL
    pub fn with_api_base(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizerError> {
        let client = Client::builder().timeout(timeout).build()?;
        let api_base = api_base.into();

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Summarize this online course in 2-3 sentences: {}", text),
                },
            ],
            max_tokens: 150,
            temperature: 0.5,
        };

        let url = format!("{}/chat/completions", self.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizerError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                SummarizerError::MalformedResponse("response contained no completion".to_string())
            })
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn summarizer(base: &str) -> OpenAiSummarizer {
        OpenAiSummarizer::with_api_base(base, "test-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_summarize_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "A tidy summary."}}
                ]
            })))
            .mount(&server)
            .await;

        let summary = summarizer(&server.uri())
            .summarize("An exhaustive course about sourdough.")
            .await
            .unwrap();

        assert_eq!(summary, "A tidy summary.");
    }

    #[tokio::test]
    async fn test_summarize_surfaces_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = summarizer(&server.uri())
            .summarize("anything")
            .await
            .unwrap_err();

        match err {
            SummarizerError::Api { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_summarize_rejects_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let err = summarizer(&server.uri())
            .summarize("anything")
            .await
            .unwrap_err();

        assert!(matches!(err, SummarizerError::MalformedResponse(_)));
    }
}
