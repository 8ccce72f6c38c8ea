use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::ConfigError;

/// A piece of shared state registered under a unique identifier.
pub trait Context: Any + Send + Sync {
    /// Identifier under which this context is registered.
    fn id(&self) -> &str;
}

/// Registry of contexts produced by upstream stages (providers, preprocessors)
/// and consumed by downstream components at construction time.
#[derive(Default, Clone)]
pub struct ContextStore {
    contexts: BTreeMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a context. Identifiers must be unique.
    pub fn create_context<C: Context>(&mut self, context: C) -> Result<(), ConfigError> {
        let id = context.id().to_string();
        if self.contexts.contains_key(&id) {
            return Err(ConfigError::DuplicateContext { id });
        }
        self.contexts.insert(id, Arc::new(context));
        Ok(())
    }

    pub fn has_context(&self, id: &str) -> bool {
        self.contexts.contains_key(id)
    }

    /// Typed lookup. `Ok(None)` if absent, an error if registered with another type.
    pub fn get_context<C: Context>(&self, id: &str) -> Result<Option<Arc<C>>, ConfigError> {
        let Some(entry) = self.contexts.get(id) else {
            return Ok(None);
        };
        Arc::clone(entry)
            .downcast::<C>()
            .map(Some)
            .map_err(|_| ConfigError::ContextTypeMismatch {
                id: id.to_string(),
                expected: std::any::type_name::<C>().to_string(),
            })
    }

    /// Typed lookup for components that cannot work without the context.
    pub fn require_context<C: Context>(&self, id: &str) -> Result<Arc<C>, ConfigError> {
        self.get_context(id)?.ok_or_else(|| ConfigError::MissingContext { id: id.to_string() })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.contexts.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ContextStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextStore")
            .field("contexts", &self.contexts.keys().collect::<Vec<_>>())
            .finish()
    }
}
