//! # lissa-aggregator
//!
//! Turns element-level classification results into artifact-level (or any
//! other granularity) trace links.

pub mod any_connection;

use std::collections::BTreeSet;

use lissa_core::config::ModuleConfiguration;
use lissa_core::errors::ConfigError;
use lissa_core::knowledge::TraceLink;
use lissa_core::models::ClassificationResult;

pub use any_connection::AnyConnectionAggregator;

/// Closed set of aggregation rules, selected by module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAggregator {
    AnyConnection(AnyConnectionAggregator),
}

impl ResultAggregator {
    pub fn from_config(config: &ModuleConfiguration) -> Result<Self, ConfigError> {
        match config.name() {
            any_connection::ANY_CONNECTION => {
                Ok(Self::AnyConnection(AnyConnectionAggregator::from_config(config)?))
            }
            other => Err(ConfigError::UnknownModule {
                kind: "result aggregator".to_string(),
                name: other.to_string(),
            }),
        }
    }

    /// Deduplicated links, sorted by source id then target id.
    pub fn aggregate(&self, results: &[ClassificationResult]) -> BTreeSet<TraceLink> {
        match self {
            Self::AnyConnection(aggregator) => aggregator.aggregate(results),
        }
    }
}
