//! Ollama chat (`POST {host}/api/chat`, non-streaming).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lissa_core::config::defaults;
use lissa_core::errors::{ClassifierError, ConfigError};
use lissa_core::models::ChatMessage;
use lissa_core::traits::IChatModel;

use super::platform::ChatModelProvider;

pub struct OllamaChat {
    client: Client,
    base_url: String,
    credentials: Option<(String, String)>,
    model: String,
    seed: i64,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f64,
    seed: i64,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaChat {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<(String, String)>,
        provider: &ChatModelProvider,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::DEFAULT_CHAT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "ollama.client".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            model: provider.model_name().to_string(),
            seed: provider.seed(),
            temperature: provider.temperature(),
        })
    }
}

impl IChatModel for OllamaChat {
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ClassifierError> {
        let url = format!("{}/api/chat", self.base_url);
        let mut request = self.client.post(&url).json(&ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                seed: self.seed,
            },
        });
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        let response = request.send().map_err(|e| ClassifierError::RemoteCall {
            model: self.model.clone(),
            reason: format!("Ollama HTTP error: {e}"),
        })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ClassifierError::RemoteCall {
                model: self.model.clone(),
                reason: format!("Ollama returned {status}: {body}"),
            });
        }
        let parsed: ChatResponse = response.json().map_err(|e| ClassifierError::MalformedResponse {
            model: self.model.clone(),
            reason: e.to_string(),
        })?;
        debug!(model = %self.model, "ollama chat response received");
        Ok(parsed.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn platform(&self) -> &str {
        "ollama"
    }
}
