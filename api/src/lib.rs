use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use ai_llm_service::{LlmService, config::default_config::config_from_env};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use question_engine::QuestionGenerator;
use quiz_store::QuizStore;
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::{AppConfig, AppState, ConfigError};
pub use crate::error_handler::{AppError, AppResult};

use crate::middleware_layer::{cors::cors, json_extractor::json_error_mapper};
use crate::routes::{
    generate::generate_route::generate_route, generate_pdf::generate_pdf_route::generate_pdf_route,
    health::health_route::health_route, quiz::get_quiz_route::get_quiz_route,
};

/// Seconds allowed for the provider probe behind `/api/health`.
const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Builds the HTTP router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/api/generate", post(generate_route))
        .route("/api/generate-pdf", post(generate_pdf_route))
        .route("/api/quiz/{quiz_id}", get(get_quiz_route))
        .route("/api/health", get(health_route))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(json_error_mapper))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

/// Reads configuration from the environment, opens the quiz store and
/// serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let config = AppConfig::from_env()?;
    let llm_cfg = config_from_env().map_err(AppError::LlmSetup)?;
    info!(provider = ?llm_cfg.provider, model = %llm_cfg.model, "LLM configured");

    let llm = LlmService::new(llm_cfg, Some(HEALTH_TIMEOUT_SECS)).map_err(AppError::LlmSetup)?;
    let store = QuizStore::open(&config.quiz_db_path)?;
    let generator = QuestionGenerator::new(Arc::new(llm));
    let state = Arc::new(AppState::new(config, generator, store));

    let listener = tokio::net::TcpListener::bind(&state.config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %state.config.address, "exam-scale API listening");

    axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    state.store.flush()?;
    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal; shutting down");
    }
}
