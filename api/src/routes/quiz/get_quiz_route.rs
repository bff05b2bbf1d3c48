//! GET /api/quiz/{quiz_id}: a previously generated quiz.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::quiz_response::QuizResponse,
};

const NOT_FOUND: &str = "Quiz not found";

#[instrument(skip_all, fields(quiz_id = %quiz_id))]
pub async fn get_quiz_route(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> AppResult<Json<QuizResponse>> {
    // Ids that are not UUIDs cannot exist in the store.
    let Ok(id) = Uuid::parse_str(quiz_id.trim()) else {
        debug!("quiz id is not a uuid");
        return Err(AppError::NotFound(NOT_FOUND.into()));
    };

    let quiz = state
        .store
        .get(&id)?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
    Ok(Json(quiz.into()))
}
