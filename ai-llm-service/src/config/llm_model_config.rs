use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{self, ConfigError, Result};

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which LLM provider/backend to use.
/// - `model`: The model identifier (e.g., `"llama-3.3-70b-versatile"`).
/// - `endpoint`: Base URL of the inference server, without the API path.
/// - `api_key`: Optional API key for providers that require authentication.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic, >1.0 = more random).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Optional request timeout in seconds.
/// - `json_mode`: Ask the provider to emit a single JSON object.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "llama-3.3-70b-versatile".to_string(),
///     endpoint: "https://api.groq.com/openai".to_string(),
///     api_key: Some("gsk_...".to_string()),
///     max_tokens: Some(2048),
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: Some(30),
///     json_mode: true,
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (base URL).
    pub endpoint: String,

    /// Optional API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// Request a JSON object response (`response_format` / `format: "json"`).
    pub json_mode: bool,
}

impl LlmModelConfig {
    /// Checks model name, endpoint scheme and sampling ranges.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        error_handler::validate_http_endpoint("endpoint", &self.endpoint)?;
        if let Some(t) = self.temperature {
            error_handler::validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
        }
        if let Some(p) = self.top_p {
            error_handler::validate_range_f32("top_p", p, 0.0, 1.0, "expected 0.0..=1.0")?;
        }
        Ok(())
    }

    /// Endpoint without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}
