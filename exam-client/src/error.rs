use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL `{0}`: expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {snippet}")]
    Status { status: StatusCode, snippet: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
