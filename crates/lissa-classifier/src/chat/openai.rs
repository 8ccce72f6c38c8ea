//! OpenAI-compatible chat completions (`POST {base}/chat/completions`).
//! Serves OpenAI, Blablador, DeepSeek, and Open WebUI.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lissa_core::config::defaults;
use lissa_core::errors::{ClassifierError, ConfigError};
use lissa_core::models::ChatMessage;
use lissa_core::traits::IChatModel;

use super::platform::{ChatModelProvider, ChatPlatform};

pub struct OpenAiCompatibleChat {
    client: Client,
    platform: ChatPlatform,
    base_url: String,
    api_key: String,
    organization: Option<String>,
    model: String,
    seed: i64,
    temperature: f64,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    seed: i64,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiCompatibleChat {
    pub fn new(
        platform: ChatPlatform,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        provider: &ChatModelProvider,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::DEFAULT_CHAT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: format!("{platform}.client"),
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            platform,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            organization: None,
            model: provider.model_name().to_string(),
            seed: provider.seed(),
            temperature: provider.temperature(),
        })
    }

    /// Sends `OpenAI-Organization` with every request.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    fn remote_error(&self, reason: String) -> ClassifierError {
        ClassifierError::RemoteCall {
            model: format!("{}/{}", self.platform, self.model),
            reason,
        }
    }
}

impl IChatModel for OpenAiCompatibleChat {
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ClassifierError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
                temperature: self.temperature,
                seed: self.seed,
            });
        if let Some(organization) = &self.organization {
            request = request.header("OpenAI-Organization", organization);
        }
        let response = request
            .send()
            .map_err(|e| self.remote_error(format!("HTTP error: {e}")))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(self.remote_error(format!("returned {status}: {body}")));
        }
        let parsed: CompletionResponse = response.json().map_err(|e| ClassifierError::MalformedResponse {
            model: self.model.clone(),
            reason: e.to_string(),
        })?;
        debug!(platform = %self.platform, model = %self.model, "chat completion received");
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ClassifierError::MalformedResponse {
                model: self.model.clone(),
                reason: "no message content in response".to_string(),
            })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn platform(&self) -> &str {
        self.platform.as_str()
    }
}
