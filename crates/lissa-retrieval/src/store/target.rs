use std::sync::Arc;

use lissa_core::config::ModuleConfiguration;
use lissa_core::context::ContextStore;
use lissa_core::errors::{ConfigError, RetrievalError};
use lissa_core::knowledge::Element;

use super::ElementStore;
use crate::entry::{ElementEmbedding, ScoredElement};
use crate::strategy::RetrievalStrategy;

/// Candidate elements, searched with the configured [`RetrievalStrategy`].
#[derive(Debug, Clone)]
pub struct TargetElementStore {
    inner: ElementStore,
    strategy: Arc<RetrievalStrategy>,
}

impl TargetElementStore {
    /// Store whose strategy is selected by `config.name()`.
    pub fn new(config: &ModuleConfiguration, context: &ContextStore) -> Result<Self, ConfigError> {
        Ok(Self::with_strategy(RetrievalStrategy::from_config(config, context)?))
    }

    pub fn with_strategy(strategy: RetrievalStrategy) -> Self {
        Self {
            inner: ElementStore::new("target"),
            strategy: Arc::new(strategy),
        }
    }

    pub fn setup(
        &mut self,
        elements: Vec<Arc<Element>>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), RetrievalError> {
        self.inner.setup(elements, embeddings)
    }

    pub fn strategy(&self) -> &RetrievalStrategy {
        &self.strategy
    }

    pub fn get_by_id(&self, id: &str) -> Option<ElementEmbedding> {
        self.inner.get_by_id(id)
    }

    pub fn get_elements_by_parent_id(&self, parent_id: &str) -> Vec<ElementEmbedding> {
        self.inner.get_elements_by_parent_id(parent_id)
    }

    pub fn get_all_elements(&self, only_compare: bool) -> Vec<ElementEmbedding> {
        self.inner.get_all_elements(only_compare)
    }

    pub fn elements(&self) -> Vec<Arc<Element>> {
        self.inner.elements()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Most similar comparable elements, best first.
    pub fn find_similar(&self, query: &ElementEmbedding) -> Result<Vec<Arc<Element>>, RetrievalError> {
        Ok(self
            .find_similar_with_distances(query)?
            .into_iter()
            .map(|(element, _)| element)
            .collect())
    }

    pub fn find_similar_with_distances(
        &self,
        query: &ElementEmbedding,
    ) -> Result<Vec<ScoredElement>, RetrievalError> {
        self.strategy
            .find_similar_elements(query, &self.inner.get_all_elements(true))
    }

    /// A new store with only the first `roots` root elements and their descendants.
    pub fn reduce(&self, roots: usize) -> Result<Self, RetrievalError> {
        Ok(Self {
            inner: ElementStore::from_entries("target", self.inner.first_roots(roots))?,
            strategy: Arc::clone(&self.strategy),
        })
    }
}
