//! LLM Client: the single point of entry for upstream text generation.
//!
//! ARCHITECTURAL RULE: No other module may call the generation API directly.
//! Callers depend on the `TextGenerator` trait; `GeminiClient` is the only
//! production adapter.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Prompt blocked by upstream: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Upstream call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Upstream client is shut down")]
    Closed,
}

impl LlmError {
    /// True when the request never produced an HTTP response (connect failure, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::Http(e) if e.is_timeout() || e.is_connect() || e.is_request())
            || matches!(self, LlmError::Timeout(_) | LlmError::Closed)
    }
}

/// Raw text returned by the upstream model. No schema is implied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationResult {
    pub raw_text: String,
}

impl GenerationResult {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw_text
    }
}

/// Minimal upstream contract: one prompt in, one block of free text out.
///
/// Carried in the orchestrator as `Arc<dyn TextGenerator>` so tests can swap
/// in a fake without any network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether a credential is available. Checked before every call so a
    /// missing key never reaches the network.
    fn is_configured(&self) -> bool;

    async fn generate(&self, prompt: &str) -> Result<GenerationResult, LlmError>;
}
