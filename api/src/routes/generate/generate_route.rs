//! POST /api/generate: questions about a free-text topic.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::{Span, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::AppResult,
    routes::{generate::generate_request::GenerateRequest, quiz_response::QuizResponse},
};

/// Handler: POST /api/generate
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/generate \
///   -H 'content-type: application/json' \
///   -d '{"topic":"Binary Search Trees","count":3,"type":"Short Answer"}'
/// ```
#[instrument(skip_all, fields(count, answer_type))]
pub async fn generate_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<QuizResponse>> {
    let Json(req) = payload?;
    Span::current()
        .record("count", req.count)
        .record("answer_type", req.answer_type.as_str());

    let questions = state
        .generator
        .from_topic(&req.topic, req.count, req.answer_type)
        .await?;
    let quiz = state.store.save(req.topic.trim(), questions)?;

    info!(quiz_id = %quiz.id, questions = quiz.questions.len(), "topic quiz stored");
    Ok(Json(quiz.into()))
}
