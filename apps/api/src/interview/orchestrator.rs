//! Prompt Orchestrator: turns one of three task kinds into a prompt, sends it
//! upstream once, and returns the text (plus local enrichment).
//!
//! Flow per call: credential check → input validation → render prompt →
//! await upstream → enrich (scores / score extraction) → return.
//!
//! Stateless. Nothing is retried; callers own retry policy.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::InputLimits;
use crate::errors::AppError;
use crate::interview::feedback::{extract_score, FeedbackScore};
use crate::interview::prompts::{
    EVALUATION_PROMPT_TEMPLATE, FEEDBACK_PROMPT_TEMPLATE, QUESTIONS_PROMPT_TEMPLATE,
};
use crate::interview::validation::{cap_text, check_round_type, require_non_blank};
use crate::llm_client::prompts::{render, EVALUATOR_PERSONA, QUESTION_WRITER_PERSONA};
use crate::llm_client::{GenerationResult, LlmError, TextGenerator};
use crate::scoring::{score_answer, EvaluationScores};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    GenerateQuestions,
    EvaluateAnswer,
    GenerateFeedback,
}

/// One upstream call, fully validated. Built per request, never stored.
#[derive(Debug, Clone)]
pub enum GenerationRequest<'a> {
    GenerateQuestions {
        resume_text: Cow<'a, str>,
        round_type: &'a str,
    },
    EvaluateAnswer {
        question: Cow<'a, str>,
        candidate_answer: Cow<'a, str>,
    },
    GenerateFeedback {
        question: Cow<'a, str>,
        candidate_answer: Cow<'a, str>,
    },
}

impl GenerationRequest<'_> {
    pub fn task_kind(&self) -> TaskKind {
        match self {
            GenerationRequest::GenerateQuestions { .. } => TaskKind::GenerateQuestions,
            GenerationRequest::EvaluateAnswer { .. } => TaskKind::EvaluateAnswer,
            GenerationRequest::GenerateFeedback { .. } => TaskKind::GenerateFeedback,
        }
    }

    /// Deterministic prompt for this request.
    pub fn prompt(&self) -> String {
        match self {
            GenerationRequest::GenerateQuestions {
                resume_text,
                round_type,
            } => render(
                QUESTIONS_PROMPT_TEMPLATE,
                &[
                    ("persona", QUESTION_WRITER_PERSONA),
                    ("round_type", *round_type),
                    ("resume_text", resume_text.as_ref()),
                ],
            ),
            GenerationRequest::EvaluateAnswer {
                question,
                candidate_answer,
            } => render(
                EVALUATION_PROMPT_TEMPLATE,
                &[
                    ("persona", EVALUATOR_PERSONA),
                    ("question", question.as_ref()),
                    ("candidate_answer", candidate_answer.as_ref()),
                ],
            ),
            GenerationRequest::GenerateFeedback {
                question,
                candidate_answer,
            } => render(
                FEEDBACK_PROMPT_TEMPLATE,
                &[
                    ("persona", EVALUATOR_PERSONA),
                    ("question", question.as_ref()),
                    ("candidate_answer", candidate_answer.as_ref()),
                ],
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerEvaluation {
    pub feedback: GenerationResult,
    pub scores: EvaluationScores,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub feedback: GenerationResult,
    pub score: FeedbackScore,
}

#[derive(Clone)]
pub struct Orchestrator {
    generator: Arc<dyn TextGenerator>,
    limits: InputLimits,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, limits: InputLimits) -> Self {
        Self { generator, limits }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    pub async fn generate_questions(
        &self,
        resume_text: &str,
        round_type: &str,
    ) -> Result<GenerationResult, AppError> {
        self.ensure_configured()?;
        require_non_blank(resume_text, "resume text")?;
        check_round_type(round_type, &self.limits)?;

        let request = GenerationRequest::GenerateQuestions {
            resume_text: cap_text(resume_text, "resume text", &self.limits)?,
            round_type,
        };
        self.dispatch(&request).await
    }

    /// Upstream feedback first; scores only once it has succeeded. Scoring
    /// sees the same capped text the model saw.
    pub async fn evaluate_answer(
        &self,
        question: &str,
        candidate_answer: &str,
    ) -> Result<AnswerEvaluation, AppError> {
        self.ensure_configured()?;

        let question = cap_text(question, "question", &self.limits)?;
        let candidate_answer = cap_text(candidate_answer, "candidate_answer", &self.limits)?;
        let request = GenerationRequest::EvaluateAnswer {
            question: question.clone(),
            candidate_answer: candidate_answer.clone(),
        };
        let feedback = self.dispatch(&request).await?;

        let (question, candidate_answer) = (question.into_owned(), candidate_answer.into_owned());
        let scores = tokio::task::spawn_blocking(move || score_answer(&question, &candidate_answer))
            .await
            .map_err(|e| {
                error!("scoring task failed: {e}");
                AppError::Internal("Could not score the answer".to_string())
            })?;

        Ok(AnswerEvaluation { feedback, scores })
    }

    pub async fn generate_feedback(
        &self,
        question: &str,
        candidate_answer: &str,
    ) -> Result<FeedbackReport, AppError> {
        self.ensure_configured()?;

        let request = GenerationRequest::GenerateFeedback {
            question: cap_text(question, "question", &self.limits)?,
            candidate_answer: cap_text(candidate_answer, "candidate_answer", &self.limits)?,
        };
        let feedback = self.dispatch(&request).await?;
        let score = extract_score(feedback.as_str());

        Ok(FeedbackReport { feedback, score })
    }

    /// Fails with a configuration error when no credential is set.
    pub fn ensure_configured(&self) -> Result<(), AppError> {
        if self.generator.is_configured() {
            Ok(())
        } else {
            Err(LlmError::MissingCredential.into())
        }
    }

    async fn dispatch(&self, request: &GenerationRequest<'_>) -> Result<GenerationResult, AppError> {
        let request_id = Uuid::new_v4();
        let task = request.task_kind();
        let prompt = request.prompt();

        info!(%request_id, ?task, prompt_chars = prompt.chars().count(), "awaiting upstream");

        match self.generator.generate(&prompt).await {
            Ok(result) => {
                info!(%request_id, ?task, output_chars = result.raw_text.chars().count(), "upstream succeeded");
                Ok(result)
            }
            Err(e) => {
                error!(%request_id, ?task, "upstream failed: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::config::OversizePolicy;

    /// Records prompts and answers with a canned reply or upstream failure.
    pub(crate) struct FakeGenerator {
        pub configured: bool,
        pub reply: Result<String, u16>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                configured: true,
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                configured: true,
                reply: Err(status),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn unconfigured() -> Arc<Self> {
            Arc::new(Self {
                configured: false,
                reply: Ok("should never be returned".to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, prompt: &str) -> Result<GenerationResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(GenerationResult::new(text.clone())),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream exploded".to_string(),
                }),
            }
        }
    }

    fn orchestrator(fake: &Arc<FakeGenerator>) -> Orchestrator {
        Orchestrator::new(fake.clone(), InputLimits::default())
    }

    #[tokio::test]
    async fn test_questions_prompt_contains_inputs_and_calls_once() {
        let fake = FakeGenerator::replying("1. Why Go?\n2. Cache size?\n3. Eviction?\n4. Metrics?");
        let result = orchestrator(&fake)
            .generate_questions("Built a scalable cache in Go.", "Technical")
            .await
            .unwrap();

        assert_eq!(fake.call_count(), 1);
        let prompt = fake.last_prompt().unwrap();
        assert!(prompt.contains("Built a scalable cache in Go."));
        assert!(prompt.contains("Technical"));
        assert!(prompt.contains("exactly 4"));
        assert!(result.as_str().starts_with("1. Why Go?"));
    }

    #[tokio::test]
    async fn test_missing_credential_never_calls_upstream() {
        let fake = FakeGenerator::unconfigured();
        let orch = orchestrator(&fake);

        let err = orch.generate_questions("resume", "HR").await.unwrap_err();
        assert_eq!(err.kind(), "configuration");
        let err = orch.evaluate_answer("q", "a").await.unwrap_err();
        assert_eq!(err.kind(), "configuration");
        let err = orch.generate_feedback("q", "a").await.unwrap_err();
        assert_eq!(err.kind(), "configuration");

        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_upstream_error() {
        let fake = FakeGenerator::failing(500);
        let orch = orchestrator(&fake);

        let err = orch.evaluate_answer("Explain caching.", "Keep hot data close.").await.unwrap_err();
        assert_eq!(err.kind(), "upstream");
        assert!(err.to_string().contains("upstream exploded"));

        let err = orch.generate_feedback("q", "a").await.unwrap_err();
        assert_eq!(err.kind(), "upstream");
        let err = orch.generate_questions("resume", "HR").await.unwrap_err();
        assert_eq!(err.kind(), "upstream");
        assert_eq!(fake.call_count(), 3);
    }

    #[tokio::test]
    async fn test_evaluate_empty_answer() {
        let fake = FakeGenerator::replying("- Score (out of 10): 1/10");
        let eval = orchestrator(&fake)
            .evaluate_answer("Explain caching.", "")
            .await
            .unwrap();

        assert_eq!(eval.scores.keyword_score, 0);
        assert_eq!(eval.scores.sentiment_score, "0.00");
        assert_eq!(fake.call_count(), 1);
        assert!(fake.last_prompt().unwrap().contains("Explain caching."));
    }

    #[tokio::test]
    async fn test_evaluate_identical_answer_scores_hundred() {
        let fake = FakeGenerator::replying("fine");
        let eval = orchestrator(&fake)
            .evaluate_answer("Explain caching.", "explain caching")
            .await
            .unwrap();
        assert_eq!(eval.scores.keyword_score, 100);
        assert_eq!(eval.feedback.as_str(), "fine");
    }

    #[tokio::test]
    async fn test_feedback_extracts_score() {
        let fake = FakeGenerator::replying("**Score (out of 10):** 7/10\n**Strengths:** concise");
        let report = orchestrator(&fake)
            .generate_feedback("Explain caching.", "Keep hot data in memory.")
            .await
            .unwrap();
        assert_eq!(report.score.to_string(), "7");
        assert!(fake.last_prompt().unwrap().contains("**Areas to Improve:**"));
    }

    #[tokio::test]
    async fn test_feedback_without_score_is_not_available() {
        let fake = FakeGenerator::replying("Solid answer, but add detail.");
        let report = orchestrator(&fake)
            .generate_feedback("q", "a")
            .await
            .unwrap();
        assert_eq!(report.score, FeedbackScore::NotAvailable);
    }

    #[tokio::test]
    async fn test_validation_happens_before_upstream() {
        let fake = FakeGenerator::replying("unused");
        let orch = orchestrator(&fake);

        assert_eq!(orch.generate_questions("   ", "HR").await.unwrap_err().kind(), "validation");
        assert_eq!(orch.generate_questions("resume", "").await.unwrap_err().kind(), "validation");
        assert_eq!(fake.call_count(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_empty_question_scores_zero() {
        let fake = FakeGenerator::replying("fine");
        let eval = orchestrator(&fake)
            .evaluate_answer("", "A cache keeps hot data close.")
            .await
            .unwrap();

        assert_eq!(eval.scores.keyword_score, 0);
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn test_feedback_accepts_blank_question() {
        let fake = FakeGenerator::replying("Score: 3/10");
        let report = orchestrator(&fake).generate_feedback("  ", "a").await.unwrap();
        assert_eq!(report.score.to_string(), "3");
    }

    #[tokio::test]
    async fn test_truncate_policy_scores_what_the_model_saw() {
        let fake = FakeGenerator::replying("ok");
        let limits = InputLimits {
            max_input_chars: 5,
            max_round_type_chars: 64,
            oversize_policy: OversizePolicy::Truncate,
        };
        let eval = Orchestrator::new(fake.clone(), limits)
            .evaluate_answer("hello", "hello terrible awful horrible bad")
            .await
            .unwrap();

        assert!(!fake.last_prompt().unwrap().contains("terrible"));
        assert_eq!(eval.scores, score_answer("hello", "hello"));
        assert_eq!(eval.scores.sentiment_score, "0.00");
    }

    #[tokio::test]
    async fn test_truncate_policy_caps_prompt_input() {
        let fake = FakeGenerator::replying("1. Q?");
        let limits = InputLimits {
            max_input_chars: 10,
            max_round_type_chars: 64,
            oversize_policy: OversizePolicy::Truncate,
        };
        Orchestrator::new(fake.clone(), limits)
            .generate_questions("0123456789ABCDEF", "HR")
            .await
            .unwrap();

        let prompt = fake.last_prompt().unwrap();
        assert!(prompt.contains("0123456789"));
        assert!(!prompt.contains("ABCDEF"));
    }

    #[test]
    fn test_prompts_are_deterministic_and_distinct() {
        let evaluate = GenerationRequest::EvaluateAnswer {
            question: "Q".into(),
            candidate_answer: "A".into(),
        };
        let feedback = GenerationRequest::GenerateFeedback {
            question: "Q".into(),
            candidate_answer: "A".into(),
        };
        assert_eq!(evaluate.prompt(), evaluate.prompt());
        assert_ne!(evaluate.prompt(), feedback.prompt());
        assert_eq!(evaluate.task_kind(), TaskKind::EvaluateAnswer);
        assert!(evaluate.prompt().contains("- Weaknesses:"));
    }
}
