//! Best-effort score mining over free-text feedback.
//!
//! The upstream model is free to change its wording. When the pattern stops
//! matching the score degrades to "N/A"; that is not an error.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

/// First "Score ... N/10" on a single line, case-insensitive.
static SCORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)score.*?([0-9]+)/10").expect("score pattern is valid"));

pub const NOT_AVAILABLE: &str = "N/A";

/// Score out of ten as written by the model, or the "N/A" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackScore {
    OutOfTen(String),
    NotAvailable,
}

impl fmt::Display for FeedbackScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackScore::OutOfTen(digits) => f.write_str(digits),
            FeedbackScore::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for FeedbackScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn extract_score(raw_text: &str) -> FeedbackScore {
    SCORE_PATTERN
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|m| FeedbackScore::OutOfTen(m.as_str().to_string()))
        .unwrap_or(FeedbackScore::NotAvailable)
}
