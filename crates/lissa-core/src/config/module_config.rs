//! Named module selection with a string-keyed argument map.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ConfigError;

/// A module (strategy, classifier, aggregator, ...) selected by `name` with
/// string arguments.
///
/// Every argument read through an accessor is recorded, together with the
/// default that was applied, so the effective configuration can be reported
/// and unused arguments detected.
#[derive(Serialize, Deserialize)]
pub struct ModuleConfiguration {
    name: String,
    #[serde(default, deserialize_with = "deserialize_args")]
    args: BTreeMap<String, String>,
    #[serde(skip)]
    retrieved: Mutex<BTreeMap<String, String>>,
}

impl ModuleConfiguration {
    pub fn new(name: impl Into<String>, args: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            args,
            retrieved: Mutex::new(BTreeMap::new()),
        }
    }

    /// Module with no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, BTreeMap::new())
    }

    /// Builder-style argument insertion.
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_argument(&self, key: &str) -> bool {
        self.args.contains_key(key)
    }

    pub fn argument_keys(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    pub fn arguments(&self) -> &BTreeMap<String, String> {
        &self.args
    }

    /// Required string argument.
    pub fn argument_as_string(&self, key: &str) -> Result<String, ConfigError> {
        let value = self
            .args
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingArgument {
                module: self.name.clone(),
                key: key.to_string(),
            })?;
        self.record(key, &value)?;
        Ok(value)
    }

    /// String argument with a default. Reading the same key twice with
    /// different defaults is a conflict.
    pub fn argument_as_string_or(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        let value = self.args.get(key).cloned().unwrap_or_else(|| default.to_string());
        self.record(key, &value)?;
        Ok(value)
    }

    pub fn argument_as_int_or(&self, key: &str, default: i64) -> Result<i64, ConfigError> {
        let raw = self.argument_as_string_or(key, &default.to_string())?;
        raw.trim().parse().map_err(|_| self.invalid(key, &raw, "an integer"))
    }

    pub fn argument_as_float_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        let raw = self.argument_as_string_or(key, &default.to_string())?;
        raw.trim().parse().map_err(|_| self.invalid(key, &raw, "a number"))
    }

    pub fn argument_as_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let raw = self.argument_as_string_or(key, &default.to_string())?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.invalid(key, &raw, "true or false")),
        }
    }

    /// Argument that is either an index into `variants` or a literal value.
    pub fn argument_as_string_by_index(
        &self,
        key: &str,
        default_index: usize,
        variants: &[&str],
    ) -> Result<String, ConfigError> {
        let raw = self
            .args
            .get(key)
            .cloned()
            .unwrap_or_else(|| default_index.to_string());
        let value = match raw.trim().parse::<usize>() {
            Ok(index) => variants
                .get(index)
                .map(|v| v.to_string())
                .ok_or_else(|| ConfigError::InvalidValue {
                    field: format!("{}.{}", self.name, key),
                    message: format!("index {index} out of bounds for {} variants", variants.len()),
                })?,
            Err(_) => raw,
        };
        self.record(key, &value)?;
        Ok(value)
    }

    /// Arguments merged with every default that was applied.
    /// Fails if an explicitly configured argument was never read.
    pub fn effective_arguments(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let retrieved = self.retrieved_snapshot();
        if let Some(unused) = self.args.keys().find(|k| !retrieved.contains_key(*k)) {
            return Err(ConfigError::UnusedArgument {
                module: self.name.clone(),
                key: unused.clone(),
            });
        }
        let mut merged = self.args.clone();
        merged.extend(retrieved);
        Ok(merged)
    }

    fn record(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut retrieved = self
            .retrieved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match retrieved.get(key) {
            Some(previous) if previous != value => Err(ConfigError::ArgumentConflict {
                module: self.name.clone(),
                key: key.to_string(),
                previous: previous.clone(),
                requested: value.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                retrieved.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    fn retrieved_snapshot(&self) -> BTreeMap<String, String> {
        self.retrieved
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn invalid(&self, key: &str, raw: &str, expected: &str) -> ConfigError {
        ConfigError::InvalidValue {
            field: format!("{}.{}", self.name, key),
            message: format!("expected {expected}, got '{raw}'"),
        }
    }
}

impl Clone for ModuleConfiguration {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            args: self.args.clone(),
            retrieved: Mutex::new(self.retrieved_snapshot()),
        }
    }
}

impl std::fmt::Debug for ModuleConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleConfiguration")
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

impl PartialEq for ModuleConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.args == other.args
    }
}

/// Accepts scalar TOML/JSON values and stores them in their string form.
fn deserialize_args<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "argument {key} must be a scalar, got {other}"
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_recorded() {
        let module = ModuleConfiguration::named("cosine_similarity");
        assert_eq!(module.argument_as_int_or("max_results", 10).unwrap(), 10);
        let effective = module.effective_arguments().unwrap();
        assert_eq!(effective.get("max_results").map(String::as_str), Some("10"));
    }

    #[test]
    fn conflicting_defaults_are_rejected() {
        let module = ModuleConfiguration::named("simple_openai");
        module.argument_as_string_or("model", "a").unwrap();
        let err = module.argument_as_string_or("model", "b").unwrap_err();
        assert!(matches!(err, ConfigError::ArgumentConflict { .. }));
    }

    #[test]
    fn unread_argument_is_reported() {
        let module = ModuleConfiguration::named("mock").with_arg("typo", "1");
        let err = module.effective_arguments().unwrap_err();
        assert!(matches!(err, ConfigError::UnusedArgument { .. }));
    }

    #[test]
    fn index_argument_resolves_variant() {
        let module = ModuleConfiguration::named("reasoning_openai").with_arg("prompt", "1");
        let value = module
            .argument_as_string_by_index("prompt", 0, &["first", "second"])
            .unwrap();
        assert_eq!(value, "second");
    }

    #[test]
    fn scalar_arguments_deserialize_as_strings() {
        let module: ModuleConfiguration =
            serde_json::from_str(r#"{"name":"x","args":{"n":5,"flag":true,"s":"v"}}"#).unwrap();
        assert_eq!(module.arguments().get("n").map(String::as_str), Some("5"));
        assert_eq!(module.argument_as_bool_or("flag", false).unwrap(), true);
    }
}
