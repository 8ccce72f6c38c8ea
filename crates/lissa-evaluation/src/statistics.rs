//! Scores found links against the gold standard and writes run outputs.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use lissa_core::errors::EvaluationError;
use lissa_core::knowledge::TraceLink;

/// Confusion sets and the derived scores of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub true_positives: BTreeSet<TraceLink>,
    pub false_positives: BTreeSet<TraceLink>,
    pub false_negatives: BTreeSet<TraceLink>,
    pub gold_standard_size: usize,
}

impl Statistics {
    pub fn calculate(found: &BTreeSet<TraceLink>, gold_standard: &BTreeSet<TraceLink>) -> Self {
        Self {
            true_positives: found.intersection(gold_standard).cloned().collect(),
            false_positives: found.difference(gold_standard).cloned().collect(),
            false_negatives: gold_standard.difference(found).cloned().collect(),
            gold_standard_size: gold_standard.len(),
        }
    }

    /// `tp / (tp + fp)`; 0 when nothing was found.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives.len(), self.true_positives.len() + self.false_positives.len())
    }

    /// `tp / (tp + fn)`; 0 for an empty gold standard.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives.len(), self.true_positives.len() + self.false_negatives.len())
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Markdown report: the effective configuration, artifact counts, and scores.
    pub fn render_markdown(
        &self,
        identifier: &str,
        configuration_summary: &str,
        source_artifacts: usize,
        target_artifacts: usize,
    ) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "## Configuration ({} -- {identifier})",
            Local::now().format("%Y-%m-%d_%H-%M%z")
        );
        let _ = writeln!(out, "```json\n{configuration_summary}\n```\n");
        let _ = writeln!(out, "## Stats");
        let _ = writeln!(out, "* #TraceLinks (GS): {}", self.gold_standard_size);
        let _ = writeln!(out, "* #Source Artifacts: {source_artifacts}");
        let _ = writeln!(out, "* #Target Artifacts: {target_artifacts}");
        let _ = writeln!(out, "## Results");
        let _ = writeln!(out, "* True Positives: {}", self.true_positives.len());
        let _ = writeln!(out, "* False Positives: {}", self.false_positives.len());
        let _ = writeln!(out, "* False Negatives: {}", self.false_negatives.len());
        let _ = writeln!(out, "* Precision: {:?}", self.precision());
        let _ = writeln!(out, "* Recall: {:?}", self.recall());
        let _ = writeln!(out, "* F1: {:?}", self.f1());
        out
    }

    /// Writes `results-<identifier>.md` into `directory` and returns its path.
    pub fn write_results(
        &self,
        directory: &Path,
        identifier: &str,
        configuration_summary: &str,
        source_artifacts: usize,
        target_artifacts: usize,
    ) -> Result<PathBuf, EvaluationError> {
        let path = directory.join(format!("results-{identifier}.md"));
        let report = self.render_markdown(identifier, configuration_summary, source_artifacts, target_artifacts);
        info!(path = %path.display(), "storing results");
        write_file(&path, &report)?;
        Ok(path)
    }
}

/// `source,target` lines sorted by source then target, joined without a trailing newline.
pub fn trace_links_csv(links: &BTreeSet<TraceLink>) -> String {
    links.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// Writes `traceLinks-<identifier>.csv` into `directory` and returns its path.
pub fn save_trace_links(
    links: &BTreeSet<TraceLink>,
    directory: &Path,
    identifier: &str,
) -> Result<PathBuf, EvaluationError> {
    let path = directory.join(format!("traceLinks-{identifier}.csv"));
    info!(path = %path.display(), links = links.len(), "storing trace links");
    write_file(&path, &trace_links_csv(links))?;
    Ok(path)
}

fn write_file(path: &Path, content: &str) -> Result<(), EvaluationError> {
    fs::write(path, content).map_err(|source| EvaluationError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(pairs: &[(&str, &str)]) -> BTreeSet<TraceLink> {
        pairs.iter().map(|(s, t)| TraceLink::new(*s, *t)).collect()
    }

    #[test]
    fn scores_from_confusion_sets() {
        let found = links(&[("S1", "T1"), ("S1", "T2"), ("S2", "T3")]);
        let gold = links(&[("S1", "T1"), ("S2", "T3"), ("S3", "T4"), ("S3", "T5")]);
        let stats = Statistics::calculate(&found, &gold);
        assert_eq!(stats.true_positives.len(), 2);
        assert_eq!(stats.false_positives, links(&[("S1", "T2")]));
        assert_eq!(stats.false_negatives.len(), 2);
        assert!((stats.precision() - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats.recall() - 0.5).abs() < 1e-12);
        assert!((stats.f1() - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn nothing_found_scores_zero() {
        let stats = Statistics::calculate(&BTreeSet::new(), &links(&[("S", "T")]));
        assert_eq!(stats.precision(), 0.0);
        assert_eq!(stats.recall(), 0.0);
        assert_eq!(stats.f1(), 0.0);
    }

    #[test]
    fn csv_is_sorted_without_trailing_newline() {
        let csv = trace_links_csv(&links(&[("b", "x"), ("a", "y"), ("a", "x")]));
        assert_eq!(csv, "a,x\na,y\nb,x");
    }

    #[test]
    fn report_lists_scores() {
        let stats = Statistics::calculate(&links(&[("S", "T")]), &links(&[("S", "T")]));
        let report = stats.render_markdown("run_1", "{}", 3, 4);
        assert!(report.starts_with("## Configuration ("));
        assert!(report.contains(" -- run_1)\n```json\n{}\n```\n\n## Stats\n"));
        assert!(report.contains("* #Source Artifacts: 3\n"));
        assert!(report.contains("* Precision: 1.0\n"));
        assert!(report.ends_with("* F1: 1.0\n"));
    }
}
