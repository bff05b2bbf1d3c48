//! Typed error for the question-engine crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

use crate::document::DocumentError;

#[derive(Debug, Error)]
pub enum QuestionEngineError {
    /// Caller-supplied parameters are unusable (empty topic, count out of range).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The uploaded document could not be turned into text.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The LLM provider call failed.
    #[error("LLM call failed: {0}")]
    Llm(#[from] AiLlmError),

    /// The model answered, but not with a usable `questions` list.
    #[error("model output is not a question list: {0}")]
    MalformedOutput(String),

    /// The blocking extraction task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
