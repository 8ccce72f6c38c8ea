//! Ollama embedding provider (`POST {host}/api/embed`).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lissa_core::config::defaults;
use lissa_core::config::env::{basic_auth_env, require_env};
use lissa_core::errors::{ConfigError, EmbeddingError};
use lissa_core::traits::IEmbeddingProvider;

pub const HOST_ENV: &str = "OLLAMA_EMBEDDING_HOST";
pub const USER_ENV: &str = "OLLAMA_EMBEDDING_USER";
pub const PASSWORD_ENV: &str = "OLLAMA_EMBEDDING_PASSWORD";

pub struct OllamaEmbeddingProvider {
    client: Client,
    base_url: String,
    model: String,
    credentials: Option<(String, String)>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaEmbeddingProvider {
    /// Reads the host (required) and optional basic-auth credentials from the environment.
    pub fn from_env(model: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = require_env(HOST_ENV)?;
        Self::new(model, base_url, basic_auth_env(USER_ENV, PASSWORD_ENV))
    }

    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        credentials: Option<(String, String)>,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "ollama.client".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            credentials,
        })
    }
}

impl IEmbeddingProvider for OllamaEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/api/embed", self.base_url);
        let mut request = self.client.post(&url).json(&EmbedRequest {
            model: &self.model,
            input: vec![text],
        });
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        let response = request.send().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("Ollama HTTP error: {e}"),
        })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            });
        }
        let parsed: EmbedResponse = response.json().map_err(|e| EmbeddingError::InferenceFailed {
            reason: format!("Ollama JSON parse error: {e}"),
        })?;
        debug!(model = %self.model, "ollama embedding received");
        parsed
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "Ollama returned no embedding".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "ollama"
    }
}
