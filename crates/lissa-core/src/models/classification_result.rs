use std::sync::Arc;

use crate::errors::ValidationError;
use crate::knowledge::Element;

/// A classifier's positive decision on a (source, target) pair.
/// Confidence is always within [0.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    source: Arc<Element>,
    target: Arc<Element>,
    confidence: f64,
}

impl ClassificationResult {
    /// Fails for confidence outside [0.0, 1.0], including NaN.
    pub fn new(
        source: Arc<Element>,
        target: Arc<Element>,
        confidence: f64,
    ) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ValidationError::ConfidenceOutOfRange { confidence });
        }
        Ok(Self {
            source,
            target,
            confidence,
        })
    }

    /// Full-confidence result.
    pub fn accepted(source: Arc<Element>, target: Arc<Element>) -> Self {
        Self {
            source,
            target,
            confidence: 1.0,
        }
    }

    pub fn source(&self) -> &Arc<Element> {
        &self.source
    }

    pub fn target(&self) -> &Arc<Element> {
        &self.target
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}
