//! Local answer scoring. Pure functions, no network.
//!
//! `keyword_score` is a Jaro-Winkler proxy for lexical overlap between the
//! answer and the question; `sentiment_score` is the comparative polarity of
//! the answer alone.

use serde::Serialize;

pub mod lexicon;
pub mod sentiment;
pub mod similarity;
pub mod tokenizer;

use sentiment::{analyze, format_comparative};
use similarity::similarity;
use tokenizer::normalize;

/// Scores returned alongside `evaluate_answer` feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationScores {
    /// 0 – 100
    pub keyword_score: u32,
    /// Comparative sentiment, rendered with two decimals.
    pub sentiment_score: String,
}

pub fn score_answer(question: &str, candidate_answer: &str) -> EvaluationScores {
    let sim = similarity(&normalize(candidate_answer), &normalize(question));
    let keyword_score = (sim * 100.0).round().clamp(0.0, 100.0) as u32;

    EvaluationScores {
        keyword_score,
        sentiment_score: format_comparative(analyze(candidate_answer).comparative),
    }
}
