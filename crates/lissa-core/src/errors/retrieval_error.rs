//! Element store and retrieval errors.

use super::error_code::{self, LissaErrorCode};
use super::ValidationError;

/// Errors from element stores and similarity strategies.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("{store} element store already set up")]
    AlreadySetUp { store: String },

    #[error("invalid store input: {0}")]
    Validation(#[from] ValidationError),

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("strategy {strategy} failed: {reason}")]
    StrategyFailed { strategy: String, reason: String },
}

impl LissaErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadySetUp { .. } => error_code::STORE_STATE,
            Self::Validation(e) => e.error_code(),
            _ => error_code::RETRIEVAL_ERROR,
        }
    }
}
