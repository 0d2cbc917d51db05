//! Gemini `generateContent` adapter.
//!
//! Wire types mirror only the fields we read. The rest of the crate sees
//! `GenerationResult` and nothing of the nested candidate/part shape.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::{GenerationResult, LlmError, TextGenerator};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// Joins the text parts of the first candidate.
    pub fn into_result(self) -> Result<GenerationResult, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(GenerationResult::new(text));
        }

        match self.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(LlmError::Blocked { reason }),
            None => Err(LlmError::EmptyContent),
        }
    }
}

/// Gemini client with an explicit timeout and a bound on in-flight calls.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let max_concurrency = config.upstream_max_concurrency.max(1);
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(max_concurrency)
            .build()?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            endpoint: generate_content_url(&config.gemini_base_url, &config.gemini_model),
            permits: Arc::new(Semaphore::new(max_concurrency)),
            timeout: config.upstream_timeout,
        })
    }

    /// Waits for a permit, then sends and parses. The caller bounds the whole
    /// thing with the upstream timeout, so queueing counts against it.
    async fn call(&self, api_key: &str, prompt: &str) -> Result<GenerationResult, LlmError> {
        let _permit = self.permits.acquire().await.map_err(|_| LlmError::Closed)?;

        let body = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: GeminiResponse = serde_json::from_slice(&bytes)?;
        parsed.into_result()
    }
}

fn generate_content_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Pulls a readable message out of a non-2xx body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<GenerationResult, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let result = tokio::time::timeout(self.timeout, self.call(api_key, prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        debug!(
            "Gemini call succeeded: prompt_chars={}, output_chars={}",
            prompt.chars().count(),
            result.raw_text.chars().count()
        );

        Ok(result)
    }
}
