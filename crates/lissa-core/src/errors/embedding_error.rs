//! Embedding subsystem errors.

use super::error_code::{self, LissaErrorCode};
use super::CacheError;

/// Embedding creation errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("tokenizer unavailable for {model}: {reason}")]
    TokenizerUnavailable { model: String, reason: String },

    #[error("cached embedding for {key} is unreadable: {reason}")]
    CorruptCacheEntry { key: String, reason: String },

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("failed to start {threads} embedding workers: {reason}")]
    WorkerPool { threads: usize, reason: String },
}

impl LissaErrorCode for EmbeddingError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InferenceFailed { .. } => error_code::REMOTE_CALL_FAILED,
            Self::Cache(e) => e.error_code(),
            _ => error_code::EMBEDDING_ERROR,
        }
    }
}
