//! Model parameters that partition caches and build their keys.

use lissa_core::models::CacheKey;

/// Parameters of the model whose calls a cache memoizes.
///
/// `parameters()` becomes part of the cache name, so two runs with different
/// model settings never share entries.
pub trait CacheParameter: Send + Sync + std::fmt::Debug {
    fn parameters(&self) -> String;

    fn create_key(&self, content: &str) -> CacheKey;
}

/// Chat model settings: `<model>_<seed>` plus `_<temperature>` when sampling is not greedy.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierCacheParameter {
    pub model_name: String,
    pub seed: i64,
    pub temperature: f64,
}

impl ClassifierCacheParameter {
    pub fn new(model_name: impl Into<String>, seed: i64, temperature: f64) -> Self {
        Self {
            model_name: model_name.into(),
            seed,
            temperature,
        }
    }
}

impl CacheParameter for ClassifierCacheParameter {
    fn parameters(&self) -> String {
        if self.temperature == 0.0 {
            format!("{}_{}", self.model_name, self.seed)
        } else {
            // Debug keeps the fractional part ("1.0", not "1").
            format!("{}_{}_{:?}", self.model_name, self.seed, self.temperature)
        }
    }

    fn create_key(&self, content: &str) -> CacheKey {
        CacheKey::chat(&self.model_name, self.seed, self.temperature, content)
    }
}

/// Embedding model settings: just the model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingCacheParameter {
    pub model_name: String,
}

impl EmbeddingCacheParameter {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl CacheParameter for EmbeddingCacheParameter {
    fn parameters(&self) -> String {
        self.model_name.clone()
    }

    fn create_key(&self, content: &str) -> CacheKey {
        CacheKey::embedding(&self.model_name, content)
    }
}
