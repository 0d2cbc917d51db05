pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/generate_questions",
            post(handlers::handle_generate_questions),
        )
        .route("/evaluate_answer", post(handlers::handle_evaluate_answer))
        .route(
            "/generate_feedback",
            post(handlers::handle_generate_feedback),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
