//! Cache-backed embedding creation.

use std::sync::{Arc, Mutex, OnceLock};

use dashmap::DashMap;
use moka::sync::Cache;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use lissa_cache::{CacheManager, CacheParameter, EmbeddingCacheParameter};
use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::errors::{ConfigError, EmbeddingError, LissaError};
use lissa_core::knowledge::Element;
use lissa_core::models::CacheKey;
use lissa_core::traits::{ICache, IEmbeddingProvider};

use crate::providers::{self, MockEmbeddingProvider, OllamaEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::tokens::TokenCounter;

const TOKEN_COUNT_CAPACITY: u64 = 1_000;

/// Creates embeddings through a provider, memoized per element content.
///
/// Lookups go L1 (in-process moka) → persistent cache → provider. Concurrent
/// misses on the same content wait for the first caller, so each distinct
/// content reaches the provider once. With more than one thread, elements are
/// split into contiguous chunks, one per worker; results always come back in
/// input order.
pub struct CachedEmbeddingCreator {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: Arc<dyn ICache>,
    parameter: EmbeddingCacheParameter,
    threads: usize,
    l1: Cache<String, Vec<f32>>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
    token_counter: OnceLock<TokenCounter>,
}

impl CachedEmbeddingCreator {
    pub fn new(
        provider: Arc<dyn IEmbeddingProvider>,
        cache: Arc<dyn ICache>,
        threads: usize,
    ) -> Self {
        let parameter = EmbeddingCacheParameter::new(provider.model_name());
        Self {
            provider,
            cache,
            parameter,
            threads: threads.max(1),
            l1: Cache::new(defaults::EMBEDDING_L1_CAPACITY),
            in_flight: DashMap::new(),
            token_counter: OnceLock::new(),
        }
    }

    /// Creator selected by `config.name()`: `ollama`, `openai`, `openwebui`, or `mock`.
    ///
    /// Remote providers read their endpoints and credentials from the environment
    /// and fail here if a required variable is missing.
    pub fn from_config(config: &ModuleConfiguration, caches: &CacheManager) -> Result<Self, LissaError> {
        let (provider, threads, origin): (Arc<dyn IEmbeddingProvider>, usize, &str) = match config.name() {
            providers::OLLAMA => {
                let model = config.argument_as_string_or("model", defaults::DEFAULT_OLLAMA_EMBEDDING_MODEL)?;
                (
                    Arc::new(OllamaEmbeddingProvider::from_env(model)?) as Arc<dyn IEmbeddingProvider>,
                    defaults::SELF_HOSTED_EMBEDDING_THREADS,
                    "OllamaEmbeddingCreator",
                )
            }
            providers::OPENAI => {
                let model = config.argument_as_string_or("model", defaults::DEFAULT_OPENAI_EMBEDDING_MODEL)?;
                (
                    Arc::new(OpenAiEmbeddingProvider::openai_from_env(model)?) as Arc<dyn IEmbeddingProvider>,
                    defaults::OPENAI_EMBEDDING_THREADS,
                    "OpenAiEmbeddingCreator",
                )
            }
            providers::OPENWEBUI => {
                let model = config.argument_as_string_or("model", defaults::DEFAULT_OPENWEBUI_EMBEDDING_MODEL)?;
                (
                    Arc::new(OpenAiEmbeddingProvider::openwebui_from_env(model)?) as Arc<dyn IEmbeddingProvider>,
                    defaults::SELF_HOSTED_EMBEDDING_THREADS,
                    "OpenWebUiEmbeddingCreator",
                )
            }
            providers::MOCK => {
                let dimensions = config.argument_as_int_or(
                    "dimensions",
                    defaults::DEFAULT_MOCK_EMBEDDING_DIMENSIONS as i64,
                )?;
                if dimensions < 1 {
                    return Err(ConfigError::InvalidValue {
                        field: "mock.dimensions".to_string(),
                        message: "must be at least 1".to_string(),
                    }
                    .into());
                }
                (
                    Arc::new(MockEmbeddingProvider::new(dimensions as usize)) as Arc<dyn IEmbeddingProvider>,
                    1,
                    "MockEmbeddingCreator",
                )
            }
            other => {
                return Err(ConfigError::UnknownModule {
                    kind: "embedding creator".to_string(),
                    name: other.to_string(),
                }
                .into())
            }
        };
        let threads = config.argument_as_int_or("threads", threads as i64)?.max(1) as usize;
        let parameter = EmbeddingCacheParameter::new(provider.model_name());
        let cache = caches.get_cache(origin, &parameter)?;
        info!(provider = provider.name(), model = provider.model_name(), threads, "embedding creator ready");
        Ok(Self::new(provider, cache, threads))
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn calculate_embedding(&self, element: &Element) -> Result<Vec<f32>, EmbeddingError> {
        self.embed_content(element.identifier(), element.content())
    }

    /// One embedding per element, in input order.
    pub fn calculate_embeddings(&self, elements: &[Arc<Element>]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let workers = self.threads.min(elements.len());
        if workers <= 1 {
            return elements.iter().map(|e| self.calculate_embedding(e)).collect();
        }

        let per_worker = elements.len() / workers;
        let chunks: Vec<&[Arc<Element>]> = (0..workers)
            .map(|i| {
                let start = i * per_worker;
                let end = if i == workers - 1 { elements.len() } else { start + per_worker };
                &elements[start..end]
            })
            .collect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| EmbeddingError::WorkerPool {
                threads: workers,
                reason: e.to_string(),
            })?;
        info!(elements = elements.len(), workers, "creating embeddings in parallel");
        let per_chunk: Vec<Vec<Vec<f32>>> = pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|e| self.calculate_embedding(e))
                        .collect::<Result<Vec<Vec<f32>>, EmbeddingError>>()
                })
                .collect::<Result<Vec<Vec<Vec<f32>>>, EmbeddingError>>()
        })?;
        Ok(per_chunk.into_iter().flatten().collect())
    }

    /// Token counter for the provider's model, loaded on first use.
    pub fn token_counter(&self) -> Result<&TokenCounter, EmbeddingError> {
        if let Some(counter) = self.token_counter.get() {
            return Ok(counter);
        }
        let counter = TokenCounter::for_model(self.provider.model_name(), TOKEN_COUNT_CAPACITY)?;
        Ok(self.token_counter.get_or_init(|| counter))
    }

    fn embed_content(&self, identifier: &str, content: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = self.parameter.create_key(content);
        if let Some(hit) = self.lookup(&key)? {
            return Ok(hit);
        }

        let slot = Arc::clone(
            self.in_flight
                .entry(key.local_key().to_string())
                .or_default()
                .value(),
        );
        let outcome = {
            let _guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // Another worker may have embedded the same content while we waited.
            match self.lookup(&key) {
                Ok(Some(hit)) => Ok(hit),
                Ok(None) => self.embed_missing(identifier, content, &key),
                Err(e) => Err(e),
            }
        };
        self.in_flight.remove(key.local_key());
        outcome
    }

    fn lookup(&self, key: &CacheKey) -> Result<Option<Vec<f32>>, EmbeddingError> {
        if let Some(hit) = self.l1.get(key.local_key()) {
            return Ok(Some(hit));
        }
        match self.cache.get(key)? {
            Some(stored) => {
                let embedding = decode(key, &stored)?;
                self.l1.insert(key.local_key().to_string(), embedding.clone());
                Ok(Some(embedding))
            }
            None => Ok(None),
        }
    }

    fn embed_missing(&self, identifier: &str, content: &str, key: &CacheKey) -> Result<Vec<f32>, EmbeddingError> {
        debug!(element = identifier, "calculating embedding");
        match self.provider.embed(content) {
            Ok(embedding) => {
                self.store(key, &embedding)?;
                Ok(embedding)
            }
            Err(e) => {
                error!(element = identifier, error = %e, "embedding failed, retrying with truncated content");
                self.embed_truncated(key.clone(), content, e)
            }
        }
    }

    /// Retry for inputs over the model's token limit. Anything else re-raises `original`.
    fn embed_truncated(
        &self,
        key: CacheKey,
        content: &str,
        original: EmbeddingError,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let fixed_key = format!("{}_fixed_{}", key.local_key(), defaults::MAX_EMBEDDING_TOKENS);
        let fixed = key.with_local_key(fixed_key);
        if let Some(stored) = self.cache.get(&fixed)? {
            info!(key = fixed.local_key(), "using truncated embedding");
            return decode(&fixed, &stored);
        }

        let Some(truncated) = self.token_counter()?.truncate_below(content, defaults::MAX_EMBEDDING_TOKENS) else {
            warn!(model = self.provider.model_name(), "content within token limit; not a length problem");
            return Err(original);
        };
        let embedding = self.provider.embed(&truncated)?;
        info!(key = fixed.local_key(), "using truncated embedding");
        self.store(&fixed, &embedding)?;
        Ok(embedding)
    }

    fn store(&self, key: &CacheKey, embedding: &[f32]) -> Result<(), EmbeddingError> {
        let serialized = serde_json::to_string(embedding).map_err(|e| EmbeddingError::CorruptCacheEntry {
            key: key.local_key().to_string(),
            reason: e.to_string(),
        })?;
        self.cache.put(key, serialized)?;
        self.l1.insert(key.local_key().to_string(), embedding.to_vec());
        Ok(())
    }
}

fn decode(key: &CacheKey, stored: &str) -> Result<Vec<f32>, EmbeddingError> {
    serde_json::from_str(stored).map_err(|e| EmbeddingError::CorruptCacheEntry {
        key: key.local_key().to_string(),
        reason: e.to_string(),
    })
}
