use serde::{Deserialize, Serialize};

/// A confirmed relation between a source and a target identifier.
/// Ordered by source id, then target id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceLink {
    pub source_id: String,
    pub target_id: String,
}

impl TraceLink {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }
}

impl std::fmt::Display for TraceLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.source_id, self.target_id)
    }
}
