use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of remote call a cache entry memoizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheMode {
    Chat,
    Embedding,
}

/// Content-addressed key of a memoized model call.
///
/// The persisted map is keyed by `local_key`, a name-based UUID of the
/// line-ending-normalized payload. Model parameters are part of the owning
/// cache's name, so one cache never mixes entries of different models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheKey {
    model: String,
    seed: i64,
    temperature: f64,
    mode: CacheMode,
    content: String,
    #[serde(skip)]
    local_key: String,
}

impl CacheKey {
    pub fn chat(model: impl Into<String>, seed: i64, temperature: f64, content: impl Into<String>) -> Self {
        Self::build(model.into(), seed, temperature, CacheMode::Chat, content.into())
    }

    /// Embedding keys carry no sampling parameters; seed and temperature are fixed at -1.
    pub fn embedding(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self::build(model.into(), -1, -1.0, CacheMode::Embedding, content.into())
    }

    fn build(model: String, seed: i64, temperature: f64, mode: CacheMode, content: String) -> Self {
        let local_key = generate_local_key(&content);
        Self {
            model,
            seed,
            temperature,
            mode,
            content,
            local_key,
        }
    }

    /// Same key stored under a different local key, for derived entries of one payload.
    pub fn with_local_key(mut self, local_key: impl Into<String>) -> Self {
        self.local_key = local_key.into();
        self
    }

    pub fn local_key(&self) -> &str {
        &self.local_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Name-based (v3) UUID of `content` with `\r\n` normalized to `\n`.
pub fn generate_local_key(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    Uuid::new_v3(&Uuid::NAMESPACE_OID, normalized.as_bytes()).to_string()
}
