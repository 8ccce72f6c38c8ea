use std::fs;

use lissa_cache::LocalCache;
use lissa_core::models::CacheKey;
use lissa_core::traits::ICache;

fn key(content: &str) -> CacheKey {
    CacheKey::embedding("nomic-embed-text:v1.5", content)
}

#[test]
fn values_survive_reopen_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emb.json");

    let cache = LocalCache::open("emb", &path).unwrap();
    cache.put(&key("alpha"), "[0.1,0.2]".into()).unwrap();
    cache.write().unwrap();

    let reopened = LocalCache::open("emb", &path).unwrap();
    assert_eq!(reopened.get(&key("alpha")).unwrap().as_deref(), Some("[0.1,0.2]"));
    assert_eq!(reopened.len(), 1);
}

#[test]
fn write_without_changes_does_not_touch_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    let cache = LocalCache::open("c", &path).unwrap();
    cache.write().unwrap();
    assert!(!path.exists());

    cache.put(&key("x"), "1".into()).unwrap();
    cache.write().unwrap();
    let before = fs::metadata(&path).unwrap().modified().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(20));
    cache.write().unwrap();
    let after = fs::metadata(&path).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn exceeding_dirty_threshold_flushes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    let cache = LocalCache::open("c", &path).unwrap();

    for i in 0..50 {
        cache.put(&key(&format!("k{i}")), "v".into()).unwrap();
    }
    assert!(!path.exists());
    assert_eq!(cache.dirty(), 50);

    cache.put(&key("k50"), "v".into()).unwrap();
    assert!(path.exists());
    assert_eq!(cache.dirty(), 0);
    let persisted: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(persisted.len(), 51);
}

#[test]
fn temp_file_is_removed_after_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    let cache = LocalCache::open("c", &path).unwrap();
    cache.put(&key("x"), "1".into()).unwrap();
    cache.write().unwrap();
    assert!(!dir.path().join("c.json.tmp.json").exists());
}

#[test]
fn blank_file_is_deleted_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    fs::write(&path, "  \n").unwrap();
    let cache = LocalCache::open("c", &path).unwrap();
    assert!(cache.is_empty());
    assert!(!path.exists());
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.json");
    fs::write(&path, "{not json").unwrap();
    let err = LocalCache::open("c", &path).err().unwrap();
    assert!(err.to_string().contains("not a valid string map"));
}

#[test]
fn crlf_content_hits_lf_entry() {
    let dir = tempfile::tempdir().unwrap();
    let cache = LocalCache::open("c", dir.path().join("c.json")).unwrap();
    cache.put(&key("line one\nline two"), "v".into()).unwrap();
    assert!(cache.contains_key(&key("line one\r\nline two")).unwrap());
}
