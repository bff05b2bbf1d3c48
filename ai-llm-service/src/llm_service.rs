//! The single generation backend used by the application.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Builds the provider HTTP client eagerly, so a bad config fails at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, config::default_config::config_from_env};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmService::new(config_from_env()?, Some(10))?);
//! let txt = svc.generate("Reply with {\"ok\": true}", None).await?;
//! println!("{txt}");
//! println!("{:?}", svc.health().await);
//! # Ok(()) }
//! ```

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

#[derive(Debug)]
enum Backend {
    OpenAI(OpenAiService),
    Ollama(OllamaService),
}

/// One configured LLM plus its health probe.
#[derive(Debug)]
pub struct LlmService {
    backend: Backend,
    health: HealthService,
}

impl LlmService {
    /// Validates `cfg` and builds the matching provider client.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the config is invalid or a client cannot be built.
    pub fn new(cfg: LlmModelConfig, health_timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        cfg.validate()?;
        let backend = match cfg.provider {
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg)?),
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg)?),
        };

        Ok(Self {
            backend,
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Generates text for `prompt` with an optional system instruction.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match &self.backend {
            Backend::OpenAI(cli) => cli.generate(prompt, system).await,
            Backend::Ollama(cli) => cli.generate(prompt, system).await,
        }
    }

    /// Probes the configured provider. Never fails.
    pub async fn health(&self) -> HealthStatus {
        self.health.check(self.config()).await
    }

    pub fn config(&self) -> &LlmModelConfig {
        match &self.backend {
            Backend::OpenAI(cli) => cli.config(),
            Backend::Ollama(cli) => cli.config(),
        }
    }
}
