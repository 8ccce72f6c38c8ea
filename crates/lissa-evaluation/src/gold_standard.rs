//! Ground-truth trace links from a two-column CSV.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::info;

use lissa_core::config::GoldStandardConfig;
use lissa_core::errors::EvaluationError;
use lissa_core::knowledge::TraceLink;

/// Links listed in `path`, one `source,target` pair per line.
///
/// With `has_header` the first line is skipped; with `swap_columns` each line
/// is read as `target,source`. Blank lines are ignored and fields are trimmed.
pub fn load_gold_standard(
    path: &Path,
    has_header: bool,
    swap_columns: bool,
) -> Result<BTreeSet<TraceLink>, EvaluationError> {
    let content = fs::read_to_string(path).map_err(|source| EvaluationError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), has_header, "loading gold standard");

    let mut links = BTreeSet::new();
    for (index, line) in content.lines().enumerate().skip(usize::from(has_header)) {
        if line.trim().is_empty() {
            continue;
        }
        let mut columns = line.split(',').map(str::trim);
        let (Some(first), Some(second)) = (columns.next(), columns.next()) else {
            return Err(EvaluationError::MalformedGoldStandard {
                path: path.display().to_string(),
                line: index + 1,
                content: line.to_string(),
            });
        };
        let link = if swap_columns {
            TraceLink::new(second, first)
        } else {
            TraceLink::new(first, second)
        };
        links.insert(link);
    }
    Ok(links)
}

/// Gold standard named by `config`, or `None` when no path is configured.
pub fn load_configured(config: &GoldStandardConfig) -> Result<Option<BTreeSet<TraceLink>>, EvaluationError> {
    match &config.path {
        Some(path) => load_gold_standard(Path::new(path), config.has_header, config.swap_columns).map(Some),
        None => Ok(None),
    }
}
