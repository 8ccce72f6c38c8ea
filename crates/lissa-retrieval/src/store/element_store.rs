//! Shared storage behind source and target stores.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use lissa_core::errors::{RetrievalError, ValidationError};
use lissa_core::knowledge::Element;

use crate::entry::ElementEmbedding;

/// Insertion-ordered `(element, embedding)` pairs with an id index.
///
/// Populated exactly once by [`ElementStore::setup`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct ElementStore {
    kind: &'static str,
    initialized: bool,
    entries: Vec<ElementEmbedding>,
    by_id: HashMap<String, usize>,
}

impl ElementStore {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind,
            initialized: false,
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Fill the store. Nothing is stored unless every check passes.
    pub fn setup(
        &mut self,
        elements: Vec<Arc<Element>>,
        embeddings: Vec<Vec<f32>>,
    ) -> Result<(), RetrievalError> {
        if self.initialized {
            return Err(RetrievalError::AlreadySetUp {
                store: self.kind.to_string(),
            });
        }
        if elements.len() != embeddings.len() {
            return Err(ValidationError::LengthMismatch {
                elements: elements.len(),
                embeddings: embeddings.len(),
            }
            .into());
        }
        if let Some(first) = embeddings.first() {
            if let Some(bad) = embeddings.iter().find(|e| e.len() != first.len()) {
                return Err(ValidationError::DimensionMismatch {
                    expected: first.len(),
                    actual: bad.len(),
                }
                .into());
            }
        }
        let mut seen = HashSet::with_capacity(elements.len());
        if let Some(dup) = elements.iter().find(|e| !seen.insert(e.identifier())) {
            return Err(ValidationError::DuplicateIdentifier {
                identifier: dup.identifier().to_string(),
            }
            .into());
        }

        self.entries = elements
            .into_iter()
            .zip(embeddings)
            .map(|(element, embedding)| ElementEmbedding::new(element, embedding))
            .collect();
        self.by_id = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.element.identifier().to_string(), i))
            .collect();
        self.initialized = true;
        debug!(store = self.kind, elements = self.entries.len(), "element store set up");
        Ok(())
    }

    /// Store pre-filled from pairs that already belong together.
    pub(crate) fn from_entries(
        kind: &'static str,
        entries: Vec<ElementEmbedding>,
    ) -> Result<Self, RetrievalError> {
        let mut store = Self::new(kind);
        let (elements, embeddings) = entries
            .into_iter()
            .map(|entry| (entry.element, entry.embedding))
            .unzip();
        store.setup(elements, embeddings)?;
        Ok(store)
    }

    pub fn is_set_up(&self) -> bool {
        self.initialized
    }

    pub fn get_by_id(&self, id: &str) -> Option<ElementEmbedding> {
        self.by_id.get(id).map(|&i| self.entries[i].clone())
    }

    /// Direct children of `parent_id`, in store order.
    pub fn get_elements_by_parent_id(&self, parent_id: &str) -> Vec<ElementEmbedding> {
        self.entries
            .iter()
            .filter(|entry| entry.element.parent_id() == Some(parent_id))
            .cloned()
            .collect()
    }

    pub fn get_all_elements(&self, only_compare: bool) -> Vec<ElementEmbedding> {
        self.entries
            .iter()
            .filter(|entry| !only_compare || entry.element.compare())
            .cloned()
            .collect()
    }

    pub fn elements(&self) -> Vec<Arc<Element>> {
        self.entries
            .iter()
            .map(|entry| Arc::clone(&entry.element))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries belonging to the first `roots` root elements, in store order.
    pub(crate) fn first_roots(&self, roots: usize) -> Vec<ElementEmbedding> {
        let kept: HashSet<&str> = self
            .entries
            .iter()
            .filter(|entry| entry.element.parent_id().is_none())
            .take(roots)
            .map(|entry| entry.element.identifier())
            .collect();
        self.entries
            .iter()
            .filter(|entry| kept.contains(entry.element.root().identifier()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: &str) -> Arc<Element> {
        Arc::new(Element::new(id, "requirement", "text", 0, None, true).unwrap())
    }

    #[test]
    fn second_setup_is_rejected() {
        let mut store = ElementStore::new("source");
        store.setup(vec![element("a")], vec![vec![1.0]]).unwrap();
        let err = store.setup(vec![element("b")], vec![vec![1.0]]).unwrap_err();
        assert!(matches!(err, RetrievalError::AlreadySetUp { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mixed_dimensions_leave_store_empty() {
        let mut store = ElementStore::new("target");
        let err = store
            .setup(vec![element("a"), element("b")], vec![vec![1.0, 0.0], vec![1.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::Validation(ValidationError::DimensionMismatch { .. })
        ));
        assert!(store.is_empty());
        assert!(!store.is_set_up());
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut store = ElementStore::new("target");
        let err = store
            .setup(vec![element("a"), element("a")], vec![vec![1.0], vec![2.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::Validation(ValidationError::DuplicateIdentifier { .. })
        ));
    }
}
