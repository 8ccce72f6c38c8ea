use std::sync::Arc;

use lissa_core::knowledge::Element;

/// An element with the embedding it was stored with.
///
/// Stores hand these out by value; the embedding is always a fresh copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEmbedding {
    pub element: Arc<Element>,
    pub embedding: Vec<f32>,
}

impl ElementEmbedding {
    pub fn new(element: Arc<Element>, embedding: Vec<f32>) -> Self {
        Self { element, embedding }
    }
}

/// A retrieved element and its similarity to the query; higher is more similar.
pub type ScoredElement = (Arc<Element>, f32);
