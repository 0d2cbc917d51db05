//! Axum route handlers for the Interview API.

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::feedback::FeedbackScore;
use crate::interview::questions::parse_numbered_questions;
use crate::interview::upload::{decode_resume, detect_format};
use crate::interview::validation::require_field;
use crate::scoring::EvaluationScores;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Shared body of `evaluate_answer` and `generate_feedback`.
/// Fields are optional so a missing one becomes a 400 with our error body.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: Option<String>,
    pub candidate_answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: String,
    /// Numbered lines split out of `questions`; empty when none were found.
    pub question_list: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateAnswerResponse {
    pub feedback: String,
    pub scores: EvaluationScores,
}

#[derive(Debug, Serialize)]
pub struct GenerateFeedbackResponse {
    pub feedback: String,
    pub score: FeedbackScore,
}

struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate_questions
///
/// Multipart form: `file` (.txt or .pdf) and `round_type`.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    state.orchestrator.ensure_configured()?;
    let mut multipart = multipart?;
    let mut upload: Option<ResumeUpload> = None;
    let mut round_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                upload = Some(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("round_type") => round_type = Some(field.text().await?),
            _ => {}
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    let round_type = require_field(round_type, "round_type")?;

    let format = detect_format(upload.file_name.as_deref(), upload.content_type.as_deref())?;
    let resume_text = decode_resume(format, upload.data).await?;

    let result = state
        .orchestrator
        .generate_questions(&resume_text, round_type.trim())
        .await?;

    Ok(Json(GenerateQuestionsResponse {
        question_list: parse_numbered_questions(result.as_str()),
        questions: result.raw_text,
    }))
}

/// POST /evaluate_answer
///
/// Upstream feedback plus local keyword and sentiment scores.
pub async fn handle_evaluate_answer(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<EvaluateAnswerResponse>, AppError> {
    state.orchestrator.ensure_configured()?;
    let Json(request) = payload?;
    let question = require_field(request.question, "question")?;
    let candidate_answer = require_field(request.candidate_answer, "candidate_answer")?;

    let evaluation = state
        .orchestrator
        .evaluate_answer(&question, &candidate_answer)
        .await?;

    Ok(Json(EvaluateAnswerResponse {
        feedback: evaluation.feedback.raw_text,
        scores: evaluation.scores,
    }))
}

/// POST /generate_feedback
///
/// Upstream feedback with a best-effort score pulled out of the text.
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<GenerateFeedbackResponse>, AppError> {
    state.orchestrator.ensure_configured()?;
    let Json(request) = payload?;
    let question = require_field(request.question, "question")?;
    let candidate_answer = require_field(request.candidate_answer, "candidate_answer")?;

    let report = state
        .orchestrator
        .generate_feedback(&question, &candidate_answer)
        .await?;

    Ok(Json(GenerateFeedbackResponse {
        feedback: report.feedback.raw_text,
        score: report.score,
    }))
}
