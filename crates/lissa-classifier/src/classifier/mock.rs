use std::sync::Arc;

use lissa_core::errors::ClassifierError;
use lissa_core::knowledge::Element;
use lissa_core::models::ClassificationResult;

use super::PairClassifier;

pub const MOCK_CLASSIFIER: &str = "mock";

/// Accepts every pair with full confidence.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockClassifier;

impl MockClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl PairClassifier for MockClassifier {
    fn name(&self) -> &str {
        MOCK_CLASSIFIER
    }

    fn threads(&self) -> usize {
        1
    }

    fn classify_pair(
        &self,
        source: &Arc<Element>,
        target: &Arc<Element>,
    ) -> Result<Option<ClassificationResult>, ClassifierError> {
        Ok(Some(ClassificationResult::accepted(
            Arc::clone(source),
            Arc::clone(target),
        )))
    }
}
