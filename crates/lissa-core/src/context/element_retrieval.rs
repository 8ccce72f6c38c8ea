use std::collections::HashMap;
use std::sync::Arc;

use super::Context;
use crate::knowledge::Element;

/// Side table mapping a component element to the artifact elements it contains.
/// Populated by an upstream code-graph stage before being registered.
#[derive(Debug, Default, Clone)]
pub struct ElementRetrieval {
    by_query: HashMap<String, Vec<Arc<Element>>>,
}

impl ElementRetrieval {
    pub const IDENTIFIER: &'static str = "element_retrieval";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_retrieval(&mut self, element: &Element, corresponding: Vec<Arc<Element>>) {
        self.by_query
            .insert(element.identifier().to_string(), corresponding);
    }

    pub fn retrieve(&self, element: &Element) -> Option<&[Arc<Element>]> {
        self.by_query.get(element.identifier()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_query.is_empty()
    }
}

impl Context for ElementRetrieval {
    fn id(&self) -> &str {
        Self::IDENTIFIER
    }
}
