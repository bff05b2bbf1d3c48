//! LLM provider layer shared by the exam service.
//!
//! - [`config`]: provider kind, per-model config, env-driven defaults
//! - [`services`]: thin OpenAI-compatible and Ollama clients
//! - [`llm_service::LlmService`]: the one configured backend the app talks to
//! - [`health_service`]: resilient provider probes for `/api/health`
//! - [`telemetry`]: a tracing layer scoped to this crate

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, Result};
pub use health_service::HealthStatus;
pub use llm_service::LlmService;
