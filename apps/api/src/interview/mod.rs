// Interview coaching: question generation from a resume, answer evaluation,
// and feedback. All LLM calls go through llm_client; no direct API calls here.

pub mod feedback;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod questions;
pub mod upload;
pub mod validation;
