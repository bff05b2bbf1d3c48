//! GET /api/health: LLM provider probe plus a store round-trip.

use std::sync::Arc;

use ai_llm_service::HealthStatus;
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub llm: HealthStatus,
    pub store_ok: bool,
}

/// Always 200; `ok` carries the verdict.
#[instrument(skip_all)]
pub async fn health_route(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let llm = state.generator.llm().health().await;
    let store_ok = state.store.ping();
    let ok = llm.ok && store_ok;
    if !ok {
        warn!(llm_ok = llm.ok, store_ok, message = %llm.message, "health check degraded");
    }
    Json(HealthResponse { ok, llm, store_ok })
}
