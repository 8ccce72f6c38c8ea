use std::cmp::Ordering;
use std::sync::Arc;

use crate::knowledge::Element;

/// A labelled candidate pair, used for evaluation and testing.
///
/// Ordered by source id, then target id, then label (`false` before `true`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassificationTask {
    pub source: Arc<Element>,
    pub target: Arc<Element>,
    pub label: bool,
}

impl ClassificationTask {
    pub fn new(source: Arc<Element>, target: Arc<Element>, label: bool) -> Self {
        Self {
            source,
            target,
            label,
        }
    }
}

impl Ord for ClassificationTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.source
            .identifier()
            .cmp(other.source.identifier())
            .then_with(|| self.target.identifier().cmp(other.target.identifier()))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for ClassificationTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for ClassificationTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ClassificationTask{{source={}, target={}, label={}}}",
            self.source.identifier(),
            self.target.identifier(),
            self.label
        )
    }
}
