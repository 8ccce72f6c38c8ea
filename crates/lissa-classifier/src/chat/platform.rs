//! Chat platforms and the per-classifier model settings derived from configuration.

use std::fmt;
use std::sync::Arc;

use lissa_cache::ClassifierCacheParameter;
use lissa_core::config::env::{basic_auth_env, require_env};
use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::constants::MODULE_NAME_SEPARATOR;
use lissa_core::errors::ConfigError;
use lissa_core::traits::IChatModel;

use super::ollama::OllamaChat;
use super::openai::OpenAiCompatibleChat;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const BLABLADOR_BASE_URL: &str = "https://api.helmholtz-blablador.fz-juelich.de/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";

/// Backends a classifier can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatPlatform {
    OpenAi,
    Ollama,
    Blablador,
    DeepSeek,
    OpenWebUi,
}

impl ChatPlatform {
    pub const ALL: [ChatPlatform; 5] = [
        Self::OpenAi,
        Self::Ollama,
        Self::Blablador,
        Self::DeepSeek,
        Self::OpenWebUi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Blablador => "blablador",
            Self::DeepSeek => "deepseek",
            Self::OpenWebUi => "openwebui",
        }
    }

    /// Worker count used when classifying against this platform.
    pub fn threads(&self) -> usize {
        match self {
            Self::OpenAi | Self::Blablador => 100,
            Self::Ollama | Self::DeepSeek | Self::OpenWebUi => 1,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Ollama | Self::OpenWebUi => "llama3:8b",
            Self::Blablador => "2 - Llama 3.3 70B instruct",
            Self::DeepSeek => "deepseek-chat",
        }
    }

    /// Platform named after the first `_` of a classifier name (`simple_openai` → OpenAI).
    pub fn from_module_name(name: &str) -> Result<Self, ConfigError> {
        let Some((_, platform)) = name.split_once(MODULE_NAME_SEPARATOR) else {
            return Err(ConfigError::InvalidValue {
                field: name.to_string(),
                message: format!(
                    "expected <mode>{MODULE_NAME_SEPARATOR}<platform>, e.g. simple_openai"
                ),
            });
        };
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(platform))
            .ok_or_else(|| ConfigError::UnknownModule {
                kind: "chat platform".to_string(),
                name: platform.to_string(),
            })
    }
}

impl fmt::Display for ChatPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model, seed, and temperature of one classifier, plus the platform serving it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatModelProvider {
    platform: ChatPlatform,
    model: String,
    seed: i64,
    temperature: f64,
}

impl ChatModelProvider {
    pub fn from_config(config: &ModuleConfiguration) -> Result<Self, ConfigError> {
        let platform = ChatPlatform::from_module_name(config.name())?;
        Ok(Self {
            platform,
            model: config.argument_as_string_or("model", platform.default_model())?,
            seed: config.argument_as_int_or("seed", defaults::DEFAULT_SEED)?,
            temperature: config.argument_as_float_or("temperature", defaults::DEFAULT_TEMPERATURE)?,
        })
    }

    pub fn new(platform: ChatPlatform, model: impl Into<String>, seed: i64, temperature: f64) -> Self {
        Self {
            platform,
            model: model.into(),
            seed,
            temperature,
        }
    }

    pub fn platform(&self) -> ChatPlatform {
        self.platform
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn threads(&self) -> usize {
        self.platform.threads()
    }

    pub fn cache_parameter(&self) -> ClassifierCacheParameter {
        ClassifierCacheParameter::new(&self.model, self.seed, self.temperature)
    }

    /// HTTP client for the platform. Fails if a required environment variable is missing.
    pub fn create_chat_model(&self) -> Result<Arc<dyn IChatModel>, ConfigError> {
        let model: Arc<dyn IChatModel> = match self.platform {
            ChatPlatform::OpenAi => {
                let organization = require_env("OPENAI_ORGANIZATION_ID")?;
                let api_key = require_env("OPENAI_API_KEY")?;
                Arc::new(
                    OpenAiCompatibleChat::new(self.platform, OPENAI_BASE_URL, api_key, self)?
                        .with_organization(organization),
                )
            }
            ChatPlatform::Blablador => {
                let api_key = require_env("BLABLADOR_API_KEY")?;
                Arc::new(OpenAiCompatibleChat::new(self.platform, BLABLADOR_BASE_URL, api_key, self)?)
            }
            ChatPlatform::DeepSeek => {
                let api_key = require_env("DEEPSEEK_API_KEY")?;
                Arc::new(OpenAiCompatibleChat::new(self.platform, DEEPSEEK_BASE_URL, api_key, self)?)
            }
            ChatPlatform::OpenWebUi => {
                let base_url = require_env("OPENWEBUI_URL")?;
                let api_key = require_env("OPENWEBUI_API_KEY")?;
                Arc::new(OpenAiCompatibleChat::new(self.platform, base_url, api_key, self)?)
            }
            ChatPlatform::Ollama => {
                let host = require_env("OLLAMA_HOST")?;
                let credentials = basic_auth_env("OLLAMA_USER", "OLLAMA_PASSWORD");
                Arc::new(OllamaChat::new(host, credentials, self)?)
            }
        };
        Ok(model)
    }
}
