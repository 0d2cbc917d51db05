mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::orchestrator::Orchestrator;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on a missing key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize upstream client
    let gemini = GeminiClient::new(&config)?;
    if config.gemini_api_key.is_some() {
        info!(
            "Gemini client initialized (model: {}, timeout: {:?}, max concurrency: {})",
            config.gemini_model, config.upstream_timeout, config.upstream_max_concurrency
        );
    } else {
        warn!("GEMINI_API_KEY not found in environment; generation requests will fail");
    }

    info!(
        "Input limits: {} chars, round type {} chars, oversize policy {:?}",
        config.limits.max_input_chars,
        config.limits.max_round_type_chars,
        config.limits.oversize_policy
    );
    let orchestrator = Orchestrator::new(Arc::new(gemini), config.limits);

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // browser client is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
