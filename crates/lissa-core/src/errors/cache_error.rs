//! Cache subsystem errors.

use super::error_code::{self, LissaErrorCode};

/// Errors from the persistent model-call cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cache file {path} is not a valid string map: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("cache serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("cache {name} already exists with parameters {existing}, requested {requested}")]
    ParameterConflict {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("cache directory {path} is not a directory")]
    NotADirectory { path: String },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("cache lock poisoned: {name}")]
    LockPoisoned { name: String },
}

impl LissaErrorCode for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::CACHE_IO,
            _ => error_code::CACHE_ERROR,
        }
    }
}
