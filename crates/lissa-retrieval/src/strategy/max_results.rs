//! Result cutoff shared by every scoring strategy.

use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::errors::ConfigError;

use crate::entry::ScoredElement;

const MAX_RESULTS_KEY: &str = "max_results";

/// How many of the best-scored elements a strategy returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxResults {
    Limited(usize),
    Unbounded,
}

impl Default for MaxResults {
    fn default() -> Self {
        Self::Limited(defaults::DEFAULT_MAX_RESULTS as usize)
    }
}

impl MaxResults {
    /// Reads `max_results`: a positive integer or `infinity` (any case).
    pub fn from_config(config: &ModuleConfiguration) -> Result<Self, ConfigError> {
        if config.has_argument(MAX_RESULTS_KEY) {
            let raw = config.argument_as_string(MAX_RESULTS_KEY)?;
            if raw.trim().eq_ignore_ascii_case(defaults::MAX_RESULTS_INFINITY) {
                return Ok(Self::Unbounded);
            }
        }
        let limit = config.argument_as_int_or(MAX_RESULTS_KEY, defaults::DEFAULT_MAX_RESULTS)?;
        if limit < 1 {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.{}", config.name(), MAX_RESULTS_KEY),
                message: "the maximum number of results must be greater than 0".to_string(),
            });
        }
        Ok(Self::Limited(limit as usize))
    }

    /// Stable descending sort by score, then truncate. Equal scores keep input order.
    pub fn apply(self, mut scored: Vec<ScoredElement>) -> Vec<ScoredElement> {
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        if let Self::Limited(limit) = self {
            scored.truncate(limit);
        }
        scored
    }
}
