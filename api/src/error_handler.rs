use ai_llm_service::AiLlmError;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use question_engine::{DocumentError, QuestionEngineError};
use quiz_store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::core::app_state::ConfigError;
use crate::core::http::response_envelope::{ApiErrorDetail, ErrorEnvelope};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("LLM setup failed: {0}")]
    LlmSetup(#[source] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("quiz storage failed: {0}")]
    Store(#[from] StoreError),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A single request field is missing or unusable.
    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::BadRequest(_) | AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Config(_)
            | AppError::LlmSetup(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::LlmSetup(_) => "LLM_SETUP_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::BadRequest(_) | AppError::InvalidField { .. } => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Http { code, .. } => *code,
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::InvalidField { field, .. } => {
                vec![ApiErrorDetail::field(*field, field_hint(field))]
            }
            _ => Vec::new(),
        }
    }
}

fn field_hint(field: &str) -> &'static str {
    match field {
        "file" => "Attach the PDF as the multipart field `file`.",
        "count" => "Send an integer between 1 and 50.",
        "type" => "Use \"Short Answer\" or \"Long Answer\".",
        _ => "Check the value of this field.",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        ErrorEnvelope::new(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Keeps axum's status (400, 413, 415 or 422) and message.
impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::Http {
            status,
            code: if status == StatusCode::UNPROCESSABLE_ENTITY {
                "UNPROCESSABLE_ENTITY"
            } else if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
                "UNSUPPORTED_MEDIA_TYPE"
            } else {
                "BAD_REQUEST"
            },
            message: err.body_text(),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.body_text())
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

/// Generation failures: caller mistakes are 4xx, upstream model trouble is 502.
impl From<QuestionEngineError> for AppError {
    fn from(err: QuestionEngineError) -> Self {
        match err {
            QuestionEngineError::InvalidRequest(msg) => AppError::BadRequest(msg),
            QuestionEngineError::Document(doc) => {
                let code = match doc {
                    DocumentError::Parse(_) => "UNREADABLE_PDF",
                    DocumentError::Encrypted => "ENCRYPTED_PDF",
                    DocumentError::NoText => "PDF_WITHOUT_TEXT",
                };
                AppError::Http {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    code,
                    message: doc.to_string(),
                }
            }
            QuestionEngineError::Llm(AiLlmError::Timeout(after)) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LLM_TIMEOUT",
                message: format!("The language model did not answer within {after:?}."),
            },
            QuestionEngineError::Llm(e) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LLM_ERROR",
                message: format!("Question generation failed upstream: {e}"),
            },
            QuestionEngineError::MalformedOutput(msg) => AppError::Http {
                status: StatusCode::BAD_GATEWAY,
                code: "LLM_MALFORMED_OUTPUT",
                message: format!("The language model returned an unusable answer: {msg}"),
            },
            QuestionEngineError::Join(e) => AppError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "JOIN_ERROR",
                message: format!("Background task failed to complete: {e}"),
            },
        }
    }
}
