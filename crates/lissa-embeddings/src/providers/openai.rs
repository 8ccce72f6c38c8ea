//! OpenAI-compatible embedding provider (`POST {base}/embeddings`).
//! Serves both OpenAI and Open WebUI.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lissa_core::config::defaults;
use lissa_core::config::env::require_env;
use lissa_core::errors::{ConfigError, EmbeddingError};
use lissa_core::traits::IEmbeddingProvider;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_ORGANIZATION_ENV: &str = "OPENAI_ORGANIZATION_ID";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENWEBUI_URL_ENV: &str = "OPENWEBUI_URL";
pub const OPENWEBUI_API_KEY_ENV: &str = "OPENWEBUI_API_KEY";

pub struct OpenAiEmbeddingProvider {
    client: Client,
    provider: &'static str,
    base_url: String,
    model: String,
    api_key: String,
    organization: Option<String>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

impl OpenAiEmbeddingProvider {
    /// OpenAI proper; needs `OPENAI_ORGANIZATION_ID` and `OPENAI_API_KEY`.
    pub fn openai_from_env(model: impl Into<String>) -> Result<Self, ConfigError> {
        let organization = require_env(OPENAI_ORGANIZATION_ENV)?;
        let api_key = require_env(OPENAI_API_KEY_ENV)?;
        Self::new("openai", model, OPENAI_BASE_URL, api_key, Some(organization))
    }

    /// Open WebUI; needs `OPENWEBUI_URL` and `OPENWEBUI_API_KEY`.
    pub fn openwebui_from_env(model: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = require_env(OPENWEBUI_URL_ENV)?;
        let api_key = require_env(OPENWEBUI_API_KEY_ENV)?;
        Self::new("openwebui", model, base_url, api_key, None)
    }

    pub fn new(
        provider: &'static str,
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        organization: Option<String>,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: format!("{provider}.client"),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            organization,
        })
    }
}

impl IEmbeddingProvider for OpenAiEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embeddings", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmbedRequest {
                model: &self.model,
                input: vec![text],
            });
        if let Some(organization) = &self.organization {
            request = request.header("OpenAI-Organization", organization);
        }
        let response = request.send().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("{} HTTP error: {e}", self.provider),
        })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("{} returned {status}: {body}", self.provider),
            });
        }
        let parsed: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("{} JSON parse error: {e}", self.provider),
        })?;
        debug!(provider = self.provider, model = %self.model, "embedding received");
        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: format!("{} returned no embedding", self.provider),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        self.provider
    }
}
