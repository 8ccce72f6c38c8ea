//! Memoized chat calls with single-flight misses.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::debug;

use lissa_cache::{CacheParameter, ClassifierCacheParameter};
use lissa_core::errors::ClassifierError;
use lissa_core::models::ChatMessage;
use lissa_core::traits::{ICache, IChatModel};

/// A chat model in front of a persistent cache.
///
/// Responses are keyed by the model parameters and a caller-chosen payload
/// (the prompt text, or a conversation's representation). Concurrent misses
/// on the same key wait for the first caller instead of calling the model again.
pub struct CachedChat {
    model: Arc<dyn IChatModel>,
    cache: Arc<dyn ICache>,
    parameter: ClassifierCacheParameter,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl CachedChat {
    pub fn new(
        model: Arc<dyn IChatModel>,
        cache: Arc<dyn ICache>,
        parameter: ClassifierCacheParameter,
    ) -> Self {
        Self {
            model,
            cache,
            parameter,
            in_flight: DashMap::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn parameter(&self) -> &ClassifierCacheParameter {
        &self.parameter
    }

    /// Response for `messages`, memoized under `payload`.
    pub fn chat(&self, payload: &str, messages: &[ChatMessage]) -> Result<String, ClassifierError> {
        let key = self.parameter.create_key(payload);
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        let slot = Arc::clone(
            self.in_flight
                .entry(key.local_key().to_string())
                .or_default()
                .value(),
        );
        let _guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have filled the entry while we waited.
        if let Some(hit) = self.cache.get(&key)? {
            return Ok(hit);
        }

        debug!(model = self.model.model_name(), key = key.local_key(), "chat cache miss");
        let outcome = self.model.chat(messages).and_then(|text| {
            self.cache.put(&key, text.clone())?;
            Ok(text)
        });
        self.in_flight.remove(key.local_key());
        outcome
    }

    /// Single user message memoized under its own text.
    pub fn chat_text(&self, request: &str) -> Result<String, ClassifierError> {
        self.chat(request, &[ChatMessage::User(request.to_string())])
    }
}
