//! Ollama API client for explanation generation

use std::time::Duration;

use async_trait::async_trait;
use foresight_core::ExplanationGenerator;
use foresight_domain::{ForesightError, LlmConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{http_error_to_domain, InfraError};

const USER_AGENT: &str = concat!("foresight/", env!("CARGO_PKG_VERSION"));

/// Client for an Ollama-compatible `/api/generate` endpoint.
///
/// One POST per call, bounded by the configured request timeout. Network
/// failures and timeouts surface as [`ForesightError::Llm`]; the pipeline
/// decides whether to fall back, not this client.
pub struct OllamaClient {
    client: reqwest::Client,
    host: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    /// Create a new client for the configured host and model.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(InfraError::from)?;

        Ok(Self { client, host: config.host.clone(), model: config.model.clone() })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host.trim_end_matches('/'))
    }
}

#[async_trait]
impl ExplanationGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let payload =
            GenerateRequest { model: &self.model, prompt, temperature, stream: false };

        let response = self
            .client
            .post(self.generate_url())
            .json(&payload)
            .send()
            .await
            .map_err(|err| ForesightError::Llm(http_error_to_domain(err).to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "received generate response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(ForesightError::Llm(format!(
                "generate request failed with status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ForesightError::Llm(format!("failed to parse response: {}", e)))?;

        Ok(parsed.response)
    }
}
