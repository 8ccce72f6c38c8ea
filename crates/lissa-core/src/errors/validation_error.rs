//! Value validation errors.

use super::error_code::{self, LissaErrorCode};

/// Errors raised when constructing a value that violates an invariant.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("content of {identifier} must not be empty")]
    EmptyContent { identifier: String },

    #[error("confidence must be between 0 and 1, got {confidence}")]
    ConfidenceOutOfRange { confidence: f64 },

    #[error("element count {elements} does not match embedding count {embeddings}")]
    LengthMismatch { elements: usize, embeddings: usize },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("element {identifier} references unknown parent {parent_id}")]
    UnknownParent { identifier: String, parent_id: String },

    #[error("element {identifier} is part of a parent cycle")]
    ParentCycle { identifier: String },

    #[error("duplicate element identifier: {identifier}")]
    DuplicateIdentifier { identifier: String },

    #[error("unknown artifact type: {value}")]
    UnknownArtifactType { value: String },
}

impl LissaErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
