//! Evaluation and statistics errors.

use super::error_code::{self, LissaErrorCode};

/// Errors raised while reading the gold standard or writing run outputs.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed gold standard line {line} in {path}: {content}")]
    MalformedGoldStandard {
        path: String,
        line: usize,
        content: String,
    },
}

impl LissaErrorCode for EvaluationError {
    fn error_code(&self) -> &'static str {
        error_code::EVALUATION_ERROR
    }
}
