//! POST /api/generate-pdf: questions about an uploaded PDF.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
};
use question_engine::AnswerType;
use quiz_store::DOCUMENT_TOPIC;
use tracing::{Span, debug, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::{generate::generate_request::DEFAULT_COUNT, quiz_response::QuizResponse},
};

/// Parsed multipart form. Unknown fields are ignored.
struct UploadForm {
    file: Option<Bytes>,
    count: u32,
    answer_type: AnswerType,
}

async fn read_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm {
        file: None,
        count: DEFAULT_COUNT,
        answer_type: AnswerType::default(),
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                debug!(file_name = ?field.file_name(), "receiving upload");
                form.file = Some(field.bytes().await?);
            }
            Some("count") => {
                let raw = field.text().await?;
                form.count = raw.trim().parse().map_err(|_| AppError::InvalidField {
                    field: "count",
                    message: format!("count must be a positive integer, got {raw:?}"),
                })?;
            }
            Some("type") => {
                let raw = field.text().await?;
                form.answer_type = raw
                    .parse()
                    .map_err(|message| AppError::InvalidField { field: "type", message })?;
            }
            _ => {}
        }
    }
    Ok(form)
}

/// Handler: POST /api/generate-pdf
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/api/generate-pdf \
///   -F file=@notes.pdf -F count=5 -F 'type=Long Answer'
/// ```
#[instrument(skip_all, fields(count, answer_type, bytes))]
pub async fn generate_pdf_route(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Json<QuizResponse>> {
    let form = read_form(multipart).await?;
    let file = form
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::InvalidField {
            field: "file",
            message: "a PDF file is required".into(),
        })?;
    Span::current()
        .record("count", form.count)
        .record("answer_type", form.answer_type.as_str())
        .record("bytes", file.len());

    let questions = state
        .generator
        .from_document(file.to_vec(), form.count, form.answer_type)
        .await?;
    let quiz = state.store.save(DOCUMENT_TOPIC, questions)?;

    info!(quiz_id = %quiz.id, questions = quiz.questions.len(), "document quiz stored");
    Ok(Json(quiz.into()))
}
