// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for Ollama's `/api/generate` endpoint.
//!
//! One outbound request per generate call, no retries. The full response is
//! awaited; there is no streaming. Backend timeouts, non-success statuses,
//! and malformed bodies all surface as `MailquillError::Generation` with a
//! distinguishing message.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use mailquill_config::model::GenerationConfig;
use mailquill_core::{GenerationBackend, HealthStatus, MailquillError};

/// Request body for a non-streaming generate call.
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    top_k: u32,
    repeat_penalty: f64,
    stop: Vec<String>,
}

/// Generation backend speaking Ollama's HTTP API.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    config: GenerationConfig,
}

impl OllamaBackend {
    /// Creates a backend from configuration.
    ///
    /// A missing `generation.ollama_url` is a fatal configuration error: any
    /// generation-dependent request would fail, so construction refuses.
    pub fn new(config: &GenerationConfig) -> Result<Self, MailquillError> {
        let base_url = config
            .ollama_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                MailquillError::Config(
                    "generation.ollama_url is not set -- export MAILQUILL_GENERATION_OLLAMA_URL \
                     or set it in mailquill.toml"
                        .to_string(),
                )
            })?
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailquillError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url,
            config: config.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    async fn post_generate(
        &self,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, MailquillError> {
        let response = self
            .client
            .post(self.generate_url())
            .json(body)
            .send()
            .await
            .map_err(|e| MailquillError::Generation {
                message: format!("request to Ollama failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "generate response received");

        let text = response
            .text()
            .await
            .map_err(|e| MailquillError::Generation {
                message: format!("failed to read Ollama response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !status.is_success() {
            return Err(MailquillError::generation(format!(
                "Ollama returned {status}: {text}"
            )));
        }

        serde_json::from_str(&text).map_err(|e| MailquillError::Generation {
            message: format!("Ollama response was not valid JSON: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl GenerationBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String, MailquillError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
            repeat_penalty: self.config.repeat_penalty,
            stop: self.config.stop.clone(),
        };
        let body = serde_json::to_value(&request).map_err(|e| MailquillError::Generation {
            message: format!("failed to encode generate request: {e}"),
            source: Some(Box::new(e)),
        })?;

        let value = self.post_generate(&body).await?;
        let text = value
            .get("response")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                MailquillError::generation(
                    "Ollama response is missing the `response` field".to_string(),
                )
            })?;
        Ok(text.trim().to_string())
    }

    async fn forward_raw(
        &self,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, MailquillError> {
        self.post_generate(&body).await
    }

    async fn health_check(&self) -> Result<HealthStatus, MailquillError> {
        // Ollama answers GET / with a plain liveness line.
        match self.client.get(&self.base_url).send().await {
            Ok(response) if response.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(response) => Ok(HealthStatus::Unhealthy(format!(
                "Ollama returned {}",
                response.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("Ollama unreachable: {e}"))),
        }
    }
}
