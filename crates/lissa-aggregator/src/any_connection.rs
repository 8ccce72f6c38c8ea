//! One link per connected pair of ancestors.

use std::collections::BTreeSet;

use tracing::{debug, info};

use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::errors::ConfigError;
use lissa_core::knowledge::TraceLink;
use lissa_core::models::ClassificationResult;

pub const ANY_CONNECTION: &str = "any_connection";

/// Links the ancestors of a result's source and target at the configured granularities.
///
/// Granularity 0 is the artifact itself, so by default a single accepted
/// sentence pair links the two whole artifacts. Results whose element sits
/// above the requested granularity have no ancestor there and are dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnyConnectionAggregator {
    source_granularity: u32,
    target_granularity: u32,
}

impl AnyConnectionAggregator {
    pub fn new(source_granularity: u32, target_granularity: u32) -> Self {
        Self {
            source_granularity,
            target_granularity,
        }
    }

    /// Reads `source_granularity` and `target_granularity` (both default 0).
    pub fn from_config(config: &ModuleConfiguration) -> Result<Self, ConfigError> {
        let source = granularity(config, "source_granularity", defaults::DEFAULT_SOURCE_GRANULARITY)?;
        let target = granularity(config, "target_granularity", defaults::DEFAULT_TARGET_GRANULARITY)?;
        Ok(Self::new(source, target))
    }

    pub fn source_granularity(&self) -> u32 {
        self.source_granularity
    }

    pub fn target_granularity(&self) -> u32 {
        self.target_granularity
    }

    pub fn aggregate(&self, results: &[ClassificationResult]) -> BTreeSet<TraceLink> {
        let mut links = BTreeSet::new();
        for result in results {
            let source = result.source().ancestor_at(self.source_granularity);
            let target = result.target().ancestor_at(self.target_granularity);
            match (source, target) {
                (Some(source), Some(target)) => {
                    links.insert(TraceLink::new(source.identifier(), target.identifier()));
                }
                _ => debug!(
                    source = result.source().identifier(),
                    target = result.target().identifier(),
                    "no ancestor at configured granularity, skipping"
                ),
            }
        }
        info!(results = results.len(), links = links.len(), "results aggregated");
        links
    }
}

fn granularity(config: &ModuleConfiguration, key: &str, default: i64) -> Result<u32, ConfigError> {
    let value = config.argument_as_int_or(key, default)?;
    u32::try_from(value).map_err(|_| ConfigError::InvalidValue {
        field: format!("{}.{key}", config.name()),
        message: format!("granularity must be a non-negative integer, got {value}"),
    })
}
