//! Health probes for LLM backends.
//!
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//! - OpenAI-compatible: `GET {endpoint}/v1/models` with Bearer auth
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] is resilient and never fails (errors mapped to `ok=false`).
//! Provider-specific probes (`try_*`) return strict `Result`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, is_http_url, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the main probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A health checker that reuses a single HTTP client.
///
/// Individual probes may override the timeout per request based on the
/// provided config.
#[derive(Debug)]
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        debug!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks health for a single LLM config, routing to the provider-specific probe.
    ///
    /// Never returns an error. Any failure is converted to
    /// `HealthStatus { ok: false, message: ... }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        if !is_http_url(&cfg.endpoint) {
            warn!(
                provider = ?cfg.provider,
                endpoint = %cfg.endpoint,
                "invalid endpoint (empty or missing http/https)"
            );
            return HealthStatus::new(cfg, false, 0, "endpoint is empty or missing http/https");
        }

        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
            LlmProvider::OpenAI => self.try_probe_openai(cfg).await,
        };

        match result {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    model = %status.model.as_deref().unwrap_or("n/a"),
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    fn timeout_for(&self, cfg: &LlmModelConfig) -> Duration {
        cfg.timeout_secs
            .map(Duration::from_secs)
            .map_or(self.default_timeout, |t| t.min(self.default_timeout))
    }

    /// Strict Ollama probe.
    ///
    /// - `GET {endpoint}/api/tags`, ensure 2xx
    /// - Best-effort: verify `cfg.model` exists in the returned tags
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let url = format!("{}/api/tags", cfg.base_url());

        let start = Instant::now();
        debug!(provider = "Ollama", model = %cfg.model, "GET {}", url);

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout_for(cfg))
            .send()
            .await?;

        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());
            error!(provider = "Ollama", %url, %status, %snippet, "health GET /api/tags failed");
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        // Expected minimal JSON: { "models": [ { "name": "<model>" }, ... ] }
        #[derive(Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let tags: Tags = resp
            .json()
            .await
            .map_err(|e| HealthError::Decode(format!("/api/tags: {e}")))?;

        Ok(match tags.models {
            Some(models) if models.iter().any(|m| m.name == cfg.model) => {
                HealthStatus::new(cfg, true, latency, "Ollama is healthy; model is available")
            }
            Some(_) => HealthStatus::new(
                cfg,
                false,
                latency,
                "Ollama is up, but model not found in /api/tags",
            ),
            None => HealthStatus::new(
                cfg,
                true,
                latency,
                "Ollama is healthy; tags response without `models` field",
            ),
        })
    }

    /// Strict OpenAI-compatible probe.
    ///
    /// - `GET {endpoint}/v1/models` with `Authorization: Bearer <api_key>`, ensure 2xx
    /// - Best-effort: verify `cfg.model` exists in the returned list
    async fn try_probe_openai(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let url = format!("{}/v1/models", cfg.base_url());

        let api_key = cfg
            .api_key
            .as_ref()
            .ok_or_else(|| HealthError::Decode("missing API key".into()))?;
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;
        auth.set_sensitive(true);

        let start = Instant::now();
        debug!(provider = "OpenAI", model = %cfg.model, "GET {}", url);

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout_for(cfg))
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;

        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let snippet = make_snippet(&resp.text().await.unwrap_or_default());
            error!(provider = "OpenAI", %url, %status, %snippet, "health GET /v1/models failed");
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        // Expected minimal JSON: { "data": [ { "id": "<model>" }, ... ] }
        #[derive(Deserialize)]
        struct ModelItem {
            id: String,
        }
        #[derive(Deserialize)]
        struct Models {
            data: Vec<ModelItem>,
        }

        match resp.json::<Models>().await {
            Ok(models) if models.data.iter().any(|m| m.id == cfg.model) => Ok(HealthStatus::new(
                cfg,
                true,
                latency,
                "provider is healthy; model is available",
            )),
            Ok(_) => Ok(HealthStatus::new(
                cfg,
                false,
                latency,
                "provider is up, but model not found in /v1/models",
            )),
            Err(e) => {
                warn!(error = %e, "failed to decode /v1/models; treating server as reachable");
                Ok(HealthStatus::new(
                    cfg,
                    true,
                    latency,
                    format!("provider is reachable; failed to decode /v1/models: {e}"),
                ))
            }
        }
    }
}
