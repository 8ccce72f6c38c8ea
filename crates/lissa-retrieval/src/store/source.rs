use std::sync::Arc;

use tracing::warn;

use lissa_core::config::ModuleConfiguration;
use lissa_core::errors::RetrievalError;
use lissa_core::knowledge::Element;

use super::{ElementStore, SOURCE_STORE_MODULE};
use crate::entry::ElementEmbedding;

/// Elements classification starts from. Enumerated, never searched.
#[derive(Debug, Clone)]
pub struct SourceElementStore {
    inner: ElementStore,
}

impl SourceElementStore {
    pub fn new(config: &ModuleConfiguration) -> Self {
        if config.name() != SOURCE_STORE_MODULE {
            warn!(
                module = config.name(),
                "source stores do not use retrieval strategies; expected \"custom\""
            );
        }
        Self {
            inner: ElementStore::new("source"),
        }
    }

    pub fn setup(
        &mut self,
        elements: Vec<Arc<Element>>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), RetrievalError> {
        self.inner.setup(elements, embeddings)
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

    /// A new store with only the first `roots` root elements and their descendants.
    pub fn reduce(&self, roots: usize) -> Result<Self, RetrievalError> {
        Ok(Self {
            inner: ElementStore::from_entries("source", self.inner.first_roots(roots))?,
        })
    }
}
