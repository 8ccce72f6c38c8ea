use std::sync::Arc;

use lissa_cache::{CacheManager, ClassifierCacheParameter, EmbeddingCacheParameter};
use lissa_core::config::CacheBackend;
use lissa_core::errors::CacheError;

#[test]
fn creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cache_dir = dir.path().join("nested").join("cache");
    let manager = CacheManager::new(&cache_dir).unwrap();
    assert!(cache_dir.is_dir());
    assert_eq!(manager.directory(), cache_dir.as_path());
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cache");
    std::fs::write(&file, "").unwrap();
    let err = CacheManager::new(&file).err().unwrap();
    assert!(matches!(err, CacheError::NotADirectory { .. }));
}

#[test]
fn colons_are_replaced_in_cache_names() {
    let name = CacheManager::cache_name("OllamaEmbedding", &EmbeddingCacheParameter::new("nomic-embed-text:v1.5"));
    assert_eq!(name, "OllamaEmbedding_nomic-embed-text__v1.5");
}

#[test]
fn same_parameters_share_one_instance() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(dir.path()).unwrap();
    let params = ClassifierCacheParameter::new("gpt-4o-mini", 133742243, 0.0);
    let a = manager.get_cache("SimpleClassifier", &params).unwrap();
    let b = manager.get_cache("SimpleClassifier", &params).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(manager.cache_names(), vec!["SimpleClassifier_gpt-4o-mini_133742243"]);
}

#[test]
fn flush_writes_all_json_caches() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CacheManager::new(dir.path()).unwrap();
    let params = EmbeddingCacheParameter::new("ada");
    let cache = manager.get_cache("OpenAiEmbedding", &params).unwrap();
    cache.put(&params_key(&params, "text"), "[1.0]".into()).unwrap();
    manager.flush().unwrap();
    assert!(dir.path().join("OpenAiEmbedding_ada.json").exists());
}

#[test]
fn sqlite_backend_shares_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CacheManager::with_backend(dir.path(), CacheBackend::Sqlite, 50).unwrap();
    let emb = EmbeddingCacheParameter::new("ada");
    let chat = ClassifierCacheParameter::new("gpt-4o-mini", 1, 0.0);
    let a = manager.get_cache("Embedding", &emb).unwrap();
    let b = manager.get_cache("Classifier", &chat).unwrap();
    a.put(&params_key(&emb, "same"), "A".into()).unwrap();
    b.put(&params_key(&chat, "same"), "B".into()).unwrap();
    assert_eq!(a.get(&params_key(&emb, "same")).unwrap().as_deref(), Some("A"));
    assert_eq!(b.get(&params_key(&chat, "same")).unwrap().as_deref(), Some("B"));
    assert!(dir.path().join(lissa_cache::manager::SQLITE_DATABASE_FILE).exists());
}

fn params_key(params: &dyn lissa_cache::CacheParameter, content: &str) -> lissa_core::models::CacheKey {
    params.create_key(content)
}
