//! Tests for run configuration loading and validation.

use std::sync::Mutex;

use lissa_core::config::{ClassifierSelection, LissaConfig};
use lissa_core::errors::ConfigError;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const TOML_SINGLE: &str = r#"
cache_dir = "./cache/dronology"

[gold_standard_configuration]
path = "datasets/dronology/answer.csv"
has_header = true

[embedding_creator]
name = "openai"
args = { model = "text-embedding-3-large" }

[source_store]
name = "custom"

[target_store]
name = "cosine_similarity"
args = { max_results = 20 }

[classifier]
name = "simple_openai"
args = { model = "gpt-4o-mini-2024-07-18", temperature = 0.0 }

[result_aggregator]
name = "any_connection"
args = { source_granularity = 0, target_granularity = 1 }
"#;

#[test]
fn test_toml_single_classifier() {
    let config = LissaConfig::from_toml(TOML_SINGLE).unwrap();
    config.validate().unwrap();
    assert_eq!(config.cache_dir, "./cache/dronology");
    let gs = config.gold_standard_configuration.as_ref().unwrap();
    assert!(gs.has_header);
    assert!(!gs.swap_columns);
    assert_eq!(
        config.target_store.argument_as_int_or("max_results", 10).unwrap(),
        20
    );
    assert!(matches!(
        config.classifier_selection().unwrap(),
        ClassifierSelection::Single(m) if m.name() == "simple_openai"
    ));
}

#[test]
fn test_json_multi_stage() {
    let json = r#"{
        "cache_dir": "cache",
        "embedding_creator": {"name": "mock", "args": {}},
        "source_store": {"name": "custom", "args": {}},
        "target_store": {"name": "cosine_similarity", "args": {"max_results": "infinity"}},
        "classifiers": [
            [{"name": "mock", "args": {}}],
            [{"name": "simple_ollama", "args": {}}, {"name": "simple_openai", "args": {}}]
        ],
        "result_aggregator": {"name": "any_connection", "args": {}}
    }"#;
    let config = LissaConfig::from_json(json).unwrap();
    config.validate().unwrap();
    match config.classifier_selection().unwrap() {
        ClassifierSelection::MultiStage(stages) => {
            assert_eq!(stages.len(), 2);
            assert_eq!(stages[1].len(), 2);
        }
        ClassifierSelection::Single(_) => panic!("expected multi-stage"),
    }
}

#[test]
fn test_empty_stage_rejected() {
    let json = r#"{"classifiers": [[]]}"#;
    let config = LissaConfig::from_json(json).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { field, .. } if field == "classifiers"));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = LissaConfig::from_toml("cache_dir = [").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_load_missing_file() {
    let err = LissaConfig::load(std::path::Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_env_override_cache_dir() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.toml");
    std::fs::write(&path, TOML_SINGLE).unwrap();

    std::env::set_var("LISSA_CACHE_DIR", "/tmp/lissa-cache-override");
    let config = LissaConfig::load(&path);
    std::env::remove_var("LISSA_CACHE_DIR");

    assert_eq!(config.unwrap().cache_dir, "/tmp/lissa-cache-override");
}

#[test]
fn test_effective_summary_contains_defaults() {
    let config = LissaConfig::from_toml(TOML_SINGLE).unwrap();
    // Simulate the modules reading their arguments.
    config.embedding_creator.argument_as_string_or("model", "ada").unwrap();
    config.target_store.argument_as_int_or("max_results", 10).unwrap();
    let classifier = config.classifier.as_ref().unwrap();
    classifier.argument_as_string_or("model", "gpt-4o-mini").unwrap();
    classifier.argument_as_float_or("temperature", 0.0).unwrap();
    classifier.argument_as_int_or("seed", 133742243).unwrap();
    config.result_aggregator.argument_as_int_or("source_granularity", 0).unwrap();
    config.result_aggregator.argument_as_int_or("target_granularity", 0).unwrap();

    let summary = config.effective_summary().unwrap();
    assert!(summary.contains("133742243"));
}

#[test]
fn test_effective_summary_rejects_unread_argument() {
    let config = LissaConfig::from_toml(TOML_SINGLE).unwrap();
    let err = config.effective_summary().unwrap_err();
    assert!(matches!(err, ConfigError::UnusedArgument { .. }));
}
