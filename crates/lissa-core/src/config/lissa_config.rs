//! Top-level run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::{GoldStandardConfig, ModuleConfiguration};
use crate::constants::CACHE_DIR_ENV_VAR;
use crate::errors::ConfigError;

/// Configuration of one trace-link recovery run.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`LISSA_CACHE_DIR`)
/// 2. Config file (TOML or JSON)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LissaConfig {
    pub cache_dir: String,
    pub cache_backend: CacheBackend,
    pub cache_max_dirty: usize,
    pub gold_standard_configuration: Option<GoldStandardConfig>,
    pub embedding_creator: ModuleConfiguration,
    pub source_store: ModuleConfiguration,
    pub target_store: ModuleConfiguration,
    pub classifier: Option<ModuleConfiguration>,
    pub classifiers: Option<Vec<Vec<ModuleConfiguration>>>,
    pub result_aggregator: ModuleConfiguration,
}

impl Default for LissaConfig {
    fn default() -> Self {
        Self {
            cache_dir: defaults::DEFAULT_CACHE_DIR.to_string(),
            cache_backend: CacheBackend::default(),
            cache_max_dirty: defaults::DEFAULT_CACHE_MAX_DIRTY,
            gold_standard_configuration: None,
            embedding_creator: ModuleConfiguration::named("mock"),
            source_store: ModuleConfiguration::named("custom"),
            target_store: ModuleConfiguration::named("cosine_similarity"),
            classifier: None,
            classifiers: None,
            result_aggregator: ModuleConfiguration::named("any_connection"),
        }
    }
}

/// Storage used for memoized model calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// One JSON file per cache, flushed after a number of dirty writes.
    #[default]
    Json,
    /// One SQLite database shared by all caches, written through on every put.
    Sqlite,
}

/// The two mutually exclusive ways of configuring classification.
#[derive(Debug, Clone, Copy)]
pub enum ClassifierSelection<'a> {
    Single(&'a ModuleConfiguration),
    MultiStage(&'a [Vec<ModuleConfiguration>]),
}

impl LissaConfig {
    /// Load from a file. `.json` files are parsed as JSON, everything else as TOML.
    /// Environment overrides are applied and the result validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut config = if is_json {
            Self::parse_json(&content, &path.display().to_string())?
        } else {
            Self::parse_toml(&content, &path.display().to_string())?
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(toml_str, "<string>")
    }

    /// Load configuration from a JSON string (for testing).
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Self::parse_json(json_str, "<string>")
    }

    fn parse_toml(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn parse_json(content: &str, path: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(CACHE_DIR_ENV_VAR) {
            if !dir.trim().is_empty() {
                self.cache_dir = dir;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier_selection()?;
        if self.cache_dir.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "cache_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.cache_max_dirty == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache_max_dirty".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(stages) = &self.classifiers {
            if stages.is_empty() || stages.iter().any(Vec::is_empty) {
                return Err(ConfigError::ValidationFailed {
                    field: "classifiers".to_string(),
                    message: "every stage must contain at least one classifier".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Exactly one of `classifier` / `classifiers` must be present.
    pub fn classifier_selection(&self) -> Result<ClassifierSelection<'_>, ConfigError> {
        match (&self.classifier, &self.classifiers) {
            (Some(single), None) => Ok(ClassifierSelection::Single(single)),
            (None, Some(stages)) => Ok(ClassifierSelection::MultiStage(stages)),
            _ => Err(ConfigError::ValidationFailed {
                field: "classifier".to_string(),
                message: "Either 'classifier' or 'classifiers' must be set, but not both."
                    .to_string(),
            }),
        }
    }

    /// Stable identifier `<prefix>_<hash>` where the hash covers the module selection.
    pub fn identifier_for(&self, prefix: &str) -> String {
        let fingerprint = serde_json::to_string(self).unwrap_or_default();
        let hash = blake3::hash(fingerprint.as_bytes()).to_hex();
        format!("{}_{}", prefix, &hash[..16])
    }

    /// Pretty JSON of the configuration with every applied default filled in.
    /// Fails if a configured argument was never read by its module.
    pub fn effective_summary(&self) -> Result<String, ConfigError> {
        let mut effective = self.clone();
        let finalize = |m: &mut ModuleConfiguration| -> Result<(), ConfigError> {
            *m = ModuleConfiguration::new(m.name().to_string(), m.effective_arguments()?);
            Ok(())
        };
        finalize(&mut effective.embedding_creator)?;
        finalize(&mut effective.source_store)?;
        finalize(&mut effective.target_store)?;
        finalize(&mut effective.result_aggregator)?;
        if let Some(classifier) = effective.classifier.as_mut() {
            finalize(classifier)?;
        }
        if let Some(stages) = effective.classifiers.as_mut() {
            for module in stages.iter_mut().flatten() {
                finalize(module)?;
            }
        }
        serde_json::to_string_pretty(&effective).map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            message: e.to_string(),
        })
    }
}
