//! Classifier subsystem errors.

use super::error_code::{self, LissaErrorCode};
use super::{CacheError, RetrievalError, ValidationError};

/// Errors raised while classifying candidate pairs.
/// Remote-call failures propagate unchanged; the classifier never retries.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("remote call to {model} failed: {reason}")]
    RemoteCall { model: String, reason: String },

    #[error("malformed response from {model}: {reason}")]
    MalformedResponse { model: String, reason: String },

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("invalid result: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to start {threads} classification workers: {reason}")]
    WorkerPool { threads: usize, reason: String },
}

impl LissaErrorCode for ClassifierError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RemoteCall { .. } => error_code::REMOTE_CALL_FAILED,
            Self::Cache(e) => e.error_code(),
            Self::Retrieval(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            _ => error_code::CLASSIFIER_ERROR,
        }
    }
}
