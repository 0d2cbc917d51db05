use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// What to do with free-text input longer than the configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OversizePolicy {
    Reject,
    Truncate,
}

impl FromStr for OversizePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "truncate" => Ok(Self::Truncate),
            other => bail!("OVERSIZE_POLICY must be 'reject' or 'truncate', got '{other}'"),
        }
    }
}

/// Size caps applied to caller input before any prompt is built.
#[derive(Debug, Clone, Copy)]
pub struct InputLimits {
    pub max_input_chars: usize,
    pub max_round_type_chars: usize,
    pub oversize_policy: OversizePolicy,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_chars: 20_000,
            max_round_type_chars: 64,
            oversize_policy: OversizePolicy::Reject,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Built once at startup and read-only afterwards.
///
/// A missing `GEMINI_API_KEY` does not stop the process: every generation
/// request fails with a configuration error instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub upstream_timeout: Duration,
    pub upstream_max_concurrency: usize,
    pub limits: InputLimits,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = InputLimits::default();

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: optional_env("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upstream_timeout: Duration::from_secs(parse_env("UPSTREAM_TIMEOUT_SECS", 30)?),
            upstream_max_concurrency: parse_env("UPSTREAM_MAX_CONCURRENCY", 16)?,
            limits: InputLimits {
                max_input_chars: parse_env("MAX_INPUT_CHARS", defaults.max_input_chars)?,
                max_round_type_chars: parse_env(
                    "MAX_ROUND_TYPE_CHARS",
                    defaults.max_round_type_chars,
                )?,
                oversize_policy: parse_env("OVERSIZE_POLICY", defaults.oversize_policy)?,
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Defaults with no credential, for router and client tests.
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            port: 0,
            rust_log: "info".to_string(),
            upstream_timeout: Duration::from_secs(1),
            upstream_max_concurrency: 2,
            limits: InputLimits::default(),
            max_upload_bytes: 1024 * 1024,
        }
    }
}

/// Treats an empty or whitespace-only variable the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}
