//! Configuration errors.

use super::error_code::{self, LissaErrorCode};

/// Errors raised while loading configuration or constructing modules from it.
/// All of these are fatal and raised at construction time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("unknown {kind} module: {name}")]
    UnknownModule { kind: String, name: String },

    #[error("argument {key} not found in module {module}")]
    MissingArgument { module: String, key: String },

    #[error("argument {key} of module {module} already read as {previous}, cannot change to {requested}")]
    ArgumentConflict {
        module: String,
        key: String,
        previous: String,
        requested: String,
    },

    #[error("argument {key} of module {module} was never read")]
    UnusedArgument { module: String, key: String },

    #[error("environment variable {name} not set")]
    MissingEnvVar { name: String },

    #[error("context {id} not registered")]
    MissingContext { id: String },

    #[error("context {id} already registered")]
    DuplicateContext { id: String },

    #[error("context {id} is not of type {expected}")]
    ContextTypeMismatch { id: String, expected: String },
}

impl LissaErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownModule { .. } => error_code::UNKNOWN_MODULE,
            Self::MissingEnvVar { .. } => error_code::MISSING_ENV_VAR,
            Self::MissingContext { .. } => error_code::MISSING_CONTEXT,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
