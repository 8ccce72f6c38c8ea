use serde::{Deserialize, Serialize};

/// Location and layout of the ground-truth trace-link CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GoldStandardConfig {
    /// Path to the two-column CSV file.
    pub path: Option<String>,
    /// Skip the first line. Default: false.
    pub has_header: bool,
    /// Columns are `target,source` instead of `source,target`. Default: false.
    pub swap_columns: bool,
}
