use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Plain-text liveness banner.
pub async fn root_handler() -> &'static str {
    "AI Interview Backend is running"
}

/// GET /health
/// Returns service status, version, and whether the upstream credential is present.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "interview-api",
        "model": state.config.gemini_model,
        "upstream_configured": state.orchestrator.is_configured(),
    }))
}
