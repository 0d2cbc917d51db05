use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s").expect("numbered line pattern is valid"));

/// Splits generated text into its numbered question lines.
///
/// Lines are trimmed and stripped of `**` bold markers before matching
/// `^\d+[.)]\s`. Anything else (preamble, blank lines) is dropped, so
/// unexpected output yields an empty list rather than an error.
pub fn parse_numbered_questions(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(|line| line.replace("**", "").trim().to_string())
        .filter(|line| NUMBERED_LINE.is_match(line))
        .collect()
}
