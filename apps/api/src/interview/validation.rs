//! Input checks applied before any prompt is built.

use std::borrow::Cow;

use tracing::warn;

use crate::config::{InputLimits, OversizePolicy};
use crate::errors::AppError;

/// Unwraps an optional request field, rejecting absent values.
pub fn require_field(value: Option<String>, field: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// Rejects empty or whitespace-only text.
pub fn require_non_blank(text: &str, field: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Applies the free-text cap. Under `Truncate` the text is cut at a char
/// boundary; under `Reject` oversize input is a validation error.
pub fn cap_text<'a>(
    text: &'a str,
    field: &str,
    limits: &InputLimits,
) -> Result<Cow<'a, str>, AppError> {
    let max = limits.max_input_chars;
    let Some((cut, _)) = text.char_indices().nth(max) else {
        return Ok(Cow::Borrowed(text));
    };

    match limits.oversize_policy {
        OversizePolicy::Reject => Err(AppError::Validation(format!(
            "{field} exceeds the maximum of {max} characters"
        ))),
        OversizePolicy::Truncate => {
            warn!("{field} truncated to {max} characters");
            Ok(Cow::Borrowed(&text[..cut]))
        }
    }
}

/// Round type is a short label; it is always rejected when too long.
pub fn check_round_type(round_type: &str, limits: &InputLimits) -> Result<(), AppError> {
    require_non_blank(round_type, "round_type")?;
    if round_type.chars().count() > limits.max_round_type_chars {
        return Err(AppError::Validation(format!(
            "round_type exceeds the maximum of {} characters",
            limits.max_round_type_chars
        )));
    }
    Ok(())
}
