use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quiz store I/O error: {0}")]
    Io(#[from] sled::Error),

    #[error("quiz record is not valid JSON: {0}")]
    Data(#[from] serde_json::Error),
}
