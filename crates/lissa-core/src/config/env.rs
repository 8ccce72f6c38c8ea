//! Environment lookups for remote backends.

use crate::errors::ConfigError;

/// Value of `name`, failing when it is unset or blank.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar {
        name: name.to_string(),
    })
}

/// Value of `name`, or `None` when it is unset or blank.
pub fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Basic-auth credentials when both variables are set and non-empty.
pub fn basic_auth_env(user_var: &str, password_var: &str) -> Option<(String, String)> {
    Some((optional_env(user_var)?, optional_env(password_var)?))
}
