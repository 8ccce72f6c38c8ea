//! End-to-end runs with offline embeddings and the accept-all classifier.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use lissa_core::config::{GoldStandardConfig, LissaConfig, ModuleConfiguration};
use lissa_core::context::ContextStore;
use lissa_core::errors::{ConfigError, EvaluationError, LissaError, RetrievalError};
use lissa_core::knowledge::{Element, TraceLink};
use lissa_evaluation::Evaluation;

fn element(id: &str, kind: &str, content: &str) -> Arc<Element> {
    Arc::new(Element::new(id, kind, content, 0, None, true).unwrap())
}

fn sources() -> Vec<Arc<Element>> {
    vec![
        element("S1", "requirement", "The system shall export reports."),
        element("S2", "requirement", "The system shall log every login."),
    ]
}

fn targets() -> Vec<Arc<Element>> {
    vec![
        element("T1", "source code", "fn export_report() {}"),
        element("T2", "source code", "fn log_login() {}"),
    ]
}

fn config(cache_dir: &Path, gold_standard: Option<GoldStandardConfig>) -> LissaConfig {
    LissaConfig {
        cache_dir: cache_dir.display().to_string(),
        gold_standard_configuration: gold_standard,
        embedding_creator: ModuleConfiguration::named("mock").with_arg("dimensions", "4"),
        target_store: ModuleConfiguration::named("cosine_similarity").with_arg("max_results", "infinity"),
        classifier: Some(ModuleConfiguration::named("mock")),
        ..LissaConfig::default()
    }
}

fn gold_standard_file(dir: &Path, content: &str) -> GoldStandardConfig {
    let path = dir.join("gold.csv");
    fs::write(&path, content).unwrap();
    GoldStandardConfig {
        path: Some(path.display().to_string()),
        has_header: true,
        swap_columns: false,
    }
}

#[test]
fn run_scores_against_gold_standard_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let gold = gold_standard_file(dir.path(), "source,target\nS1,T1\nS2,T2\nS3,T3\n");
    let output = dir.path().join("out");
    let mut evaluation = Evaluation::new(
        config(&dir.path().join("cache"), Some(gold)),
        &ContextStore::new(),
        &output,
    )
    .unwrap()
    .with_run_name("demo");

    let outcome = evaluation.run(sources(), targets()).unwrap();

    assert!(outcome.identifier.starts_with("demo_"));
    assert_eq!(outcome.links.len(), 4);
    let statistics = outcome.statistics.unwrap();
    assert_eq!(statistics.true_positives.len(), 2);
    assert_eq!(statistics.false_positives.len(), 2);
    assert_eq!(
        statistics.false_negatives.into_iter().collect::<Vec<_>>(),
        vec![TraceLink::new("S3", "T3")]
    );

    let csv = fs::read_to_string(&outcome.trace_links_path).unwrap();
    assert_eq!(csv, "S1,T1\nS1,T2\nS2,T1\nS2,T2");
    assert_eq!(
        outcome.trace_links_path.file_name().unwrap().to_string_lossy(),
        format!("traceLinks-{}.csv", outcome.identifier)
    );

    let report = fs::read_to_string(outcome.results_path.unwrap()).unwrap();
    assert!(report.contains("* #TraceLinks (GS): 3\n"));
    assert!(report.contains("* #Source Artifacts: 2\n"));
    assert!(report.contains("* True Positives: 2\n"));
    assert!(report.contains("* Precision: 0.5\n"));
    assert!(report.contains("\"max_results\": \"infinity\""));
}

#[test]
fn run_without_gold_standard_only_saves_links() {
    let dir = tempfile::tempdir().unwrap();
    let mut evaluation =
        Evaluation::new(config(&dir.path().join("cache"), None), &ContextStore::new(), dir.path()).unwrap();

    let outcome = evaluation.run(sources(), targets()).unwrap();

    assert!(outcome.statistics.is_none());
    assert!(outcome.results_path.is_none());
    assert!(outcome.trace_links_path.exists());
}

#[test]
fn caches_are_flushed_after_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("cache");
    let mut evaluation = Evaluation::new(config(&cache_dir, None), &ContextStore::new(), dir.path()).unwrap();
    evaluation.run(sources(), targets()).unwrap();

    let cache_files: Vec<_> = fs::read_dir(&cache_dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert!(!cache_files.is_empty());
}

#[test]
fn source_limit_keeps_first_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let mut evaluation = Evaluation::new(config(&dir.path().join("cache"), None), &ContextStore::new(), dir.path())
        .unwrap()
        .with_source_limit(1);

    let outcome = evaluation.run(sources(), targets()).unwrap();

    let expected = [TraceLink::new("S1", "T1"), TraceLink::new("S1", "T2")];
    assert_eq!(outcome.links.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn second_run_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut evaluation =
        Evaluation::new(config(&dir.path().join("cache"), None), &ContextStore::new(), dir.path()).unwrap();
    evaluation.run(sources(), targets()).unwrap();

    let err = evaluation.run(sources(), targets()).err().unwrap();
    assert!(matches!(err, LissaError::Retrieval(RetrievalError::AlreadySetUp { .. })));
}

#[test]
fn missing_gold_standard_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let gold = GoldStandardConfig {
        path: Some(dir.path().join("absent.csv").display().to_string()),
        ..GoldStandardConfig::default()
    };
    let err = Evaluation::new(config(&dir.path().join("cache"), Some(gold)), &ContextStore::new(), dir.path())
        .err()
        .unwrap();
    assert!(matches!(err, LissaError::Evaluation(EvaluationError::Io { .. })));
}

#[test]
fn both_classifier_forms_fail_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(&dir.path().join("cache"), None);
    config.classifiers = Some(vec![vec![ModuleConfiguration::named("mock")]]);
    let err = Evaluation::new(config, &ContextStore::new(), dir.path()).err().unwrap();
    assert!(matches!(err, LissaError::Config(ConfigError::ValidationFailed { .. })));
}
