use std::path::PathBuf;

use question_engine::{QuestionGenerator, document::DEFAULT_MAX_DOCUMENT_CHARS};
use quiz_store::QuizStore;
use thiserror::Error;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_QUIZ_DB_PATH: &str = "data/quizzes";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value in {var}: {reason}")]
    InvalidNumber { var: &'static str, reason: String },
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address, e.g. "0.0.0.0:8000".
    pub address: String,
    /// sled directory for stored quizzes.
    pub quiz_db_path: PathBuf,
    /// Request body limit; applies to PDF uploads.
    pub max_upload_bytes: usize,
    /// Extracted-text budget per uploaded document.
    pub max_document_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.into(),
            quiz_db_path: PathBuf::from(DEFAULT_QUIZ_DB_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }
}

impl AppConfig {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`; unset or blank variables use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            address: get("API_ADDRESS").unwrap_or(defaults.address),
            quiz_db_path: get("QUIZ_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.quiz_db_path),
            max_upload_bytes: parse_positive(get("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            max_document_chars: parse_positive(get("MAX_DOCUMENT_CHARS"), "MAX_DOCUMENT_CHARS")?
                .unwrap_or(defaults.max_document_chars),
        })
    }
}

fn parse_positive(raw: Option<String>, var: &'static str) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidNumber {
            var,
            reason: "must be greater than zero".into(),
        }),
        Ok(n) => Ok(Some(n)),
        Err(e) => Err(ConfigError::InvalidNumber {
            var,
            reason: e.to_string(),
        }),
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub generator: QuestionGenerator,
    pub store: QuizStore,
}

impl AppState {
    pub fn new(config: AppConfig, generator: QuestionGenerator, store: QuizStore) -> Self {
        let generator = generator.with_max_document_chars(config.max_document_chars);
        Self {
            config,
            generator,
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.max_upload_bytes, 20_971_520);
        assert_eq!(cfg.max_document_chars, 15_000);
    }

    #[test]
    fn overrides_and_blank_values() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("API_ADDRESS", "127.0.0.1:9000"),
            ("QUIZ_DB_PATH", "  "),
            ("MAX_DOCUMENT_CHARS", "4000"),
        ]))
        .unwrap();
        assert_eq!(cfg.address, "127.0.0.1:9000");
        assert_eq!(cfg.quiz_db_path, PathBuf::from("data/quizzes"));
        assert_eq!(cfg.max_document_chars, 4000);
    }

    #[test]
    fn rejects_bad_numbers() {
        for value in ["lots", "0", "-1"] {
            let err = AppConfig::from_lookup(lookup(&[("MAX_UPLOAD_BYTES", value)])).unwrap_err();
            assert!(err.to_string().contains("MAX_UPLOAD_BYTES"), "{value}");
        }
    }
}
