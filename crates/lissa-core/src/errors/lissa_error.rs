//! Top-level error aggregating every subsystem error.

use super::error_code::LissaErrorCode;
use super::{
    CacheError, ClassifierError, ConfigError, EmbeddingError, EvaluationError, RetrievalError,
    ValidationError,
};

/// Errors that can occur anywhere in a LiSSA run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum LissaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

impl LissaErrorCode for LissaError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Cache(e) => e.error_code(),
            Self::Retrieval(e) => e.error_code(),
            Self::Classifier(e) => e.error_code(),
            Self::Embedding(e) => e.error_code(),
            Self::Evaluation(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type LissaResult<T> = Result<T, LissaError>;
