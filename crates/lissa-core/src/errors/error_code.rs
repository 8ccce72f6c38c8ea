//! LissaErrorCode trait for structured error reporting.

/// Every error enum implements this to expose a stable error code string
/// that survives message rewording.
pub trait LissaErrorCode {
    /// Returns the error code string (e.g., "CACHE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const UNKNOWN_MODULE: &str = "UNKNOWN_MODULE";
pub const MISSING_ENV_VAR: &str = "MISSING_ENV_VAR";
pub const MISSING_CONTEXT: &str = "MISSING_CONTEXT";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CACHE_ERROR: &str = "CACHE_ERROR";
pub const CACHE_IO: &str = "CACHE_IO";
pub const STORE_STATE: &str = "STORE_STATE";
pub const RETRIEVAL_ERROR: &str = "RETRIEVAL_ERROR";
pub const REMOTE_CALL_FAILED: &str = "REMOTE_CALL_FAILED";
pub const CLASSIFIER_ERROR: &str = "CLASSIFIER_ERROR";
pub const EMBEDDING_ERROR: &str = "EMBEDDING_ERROR";
pub const EVALUATION_ERROR: &str = "EVALUATION_ERROR";
