//! Default LLM config loaded from environment variables.
//!
//! One generation profile is resolved from `LLM_KIND`:
//!
//! - `groq` (default) → OpenAI-compatible API at `https://api.groq.com/openai`
//! - `openai`         → OpenAI-compatible API at `https://api.openai.com`
//! - `ollama`         → local Ollama runtime
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`groq`, `openai`, `ollama`)
//! - `LLM_MODEL`        = model name (defaults per provider, required for Ollama
//!   unless `OLLAMA_MODEL` is set)
//! - `LLM_ENDPOINT`     = base URL override
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = sampling temperature (default `0.7`)
//! - `LLM_TOP_P`        = optional nucleus sampling
//! - `LLM_TIMEOUT_SECS` = request timeout (default `60`)
//! - `LLM_JSON_MODE`    = `true`/`false` (default `true`)
//!
//! Keys:
//! - `LLM_API_KEY`, or `GROQ_API_KEY` / `OPENAI_API_KEY` for the matching kind
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory unless `LLM_ENDPOINT`)
//! - `OLLAMA_MODEL`                = model name

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, Result, must_var, opt_f32, opt_u32, opt_u64, opt_var,
        validate_http_endpoint,
    },
};

pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds the generation config from the process environment.
///
/// # Errors
/// See [`config_from_lookup`].
pub fn config_from_env() -> Result<LlmModelConfig> {
    config_from_lookup(|name| std::env::var(name).ok())
}

/// Builds the generation config from an arbitrary variable lookup.
///
/// # Errors
///
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`] if the API key (or Ollama endpoint/model) is absent
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::InvalidFormat`] /
///   [`ConfigError::OutOfRange`] for malformed values
pub fn config_from_lookup<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = opt_var(&lookup, "LLM_KIND").unwrap_or_else(|| "groq".to_string());
    let provider: LlmProvider = kind.parse()?;
    let is_groq = kind.trim().eq_ignore_ascii_case("groq");

    let (endpoint, model, api_key) = match provider {
        LlmProvider::OpenAI => {
            let (default_endpoint, default_model, key_var) = if is_groq {
                (GROQ_ENDPOINT, GROQ_DEFAULT_MODEL, "GROQ_API_KEY")
            } else {
                (OPENAI_ENDPOINT, OPENAI_DEFAULT_MODEL, "OPENAI_API_KEY")
            };
            let endpoint =
                opt_var(&lookup, "LLM_ENDPOINT").unwrap_or_else(|| default_endpoint.to_string());
            let model =
                opt_var(&lookup, "LLM_MODEL").unwrap_or_else(|| default_model.to_string());
            let api_key = match opt_var(&lookup, "LLM_API_KEY") {
                Some(k) => k,
                None => must_var(&lookup, key_var)?,
            };
            (endpoint, model, Some(api_key))
        }
        LlmProvider::Ollama => {
            let endpoint = match opt_var(&lookup, "LLM_ENDPOINT") {
                Some(url) => url,
                None => ollama_endpoint(&lookup)?,
            };
            let model = match opt_var(&lookup, "OLLAMA_MODEL") {
                Some(m) => m,
                None => must_var(&lookup, "LLM_MODEL")?,
            };
            (endpoint, model, None)
        }
    };
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let json_mode = match opt_var(&lookup, "LLM_JSON_MODE") {
        None => true,
        Some(v) => parse_bool("LLM_JSON_MODE", &v)?,
    };

    let cfg = LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: opt_u32(&lookup, "LLM_MAX_TOKENS")?,
        temperature: Some(opt_f32(&lookup, "LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE)),
        top_p: opt_f32(&lookup, "LLM_TOP_P")?,
        timeout_secs: Some(opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        json_mode,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint<F>(lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = opt_var(lookup, "OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = opt_var(lookup, "OLLAMA_PORT") {
        port.parse::<u16>().map_err(|_| ConfigError::InvalidNumber {
            var: "OLLAMA_PORT",
            reason: "expected u16 (1..=65535)",
        })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFormat {
            var,
            reason: "expected true or false",
        }
        .into()),
    }
}
