//! JSON-file cache keyed by the local key of a [`CacheKey`].
//!
//! The whole map lives in memory. Changed entries are counted and the file is
//! rewritten once the count exceeds the configured threshold, or on an explicit
//! [`ICache::write`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use lissa_core::config::defaults;
use lissa_core::constants::CACHE_TEMP_SUFFIX;
use lissa_core::errors::CacheError;
use lissa_core::models::CacheKey;
use lissa_core::traits::ICache;

struct LocalState {
    entries: BTreeMap<String, String>,
    dirty: usize,
}

/// File-backed cache holding a `local key -> value` map.
pub struct LocalCache {
    name: String,
    path: PathBuf,
    max_dirty: usize,
    state: Mutex<LocalState>,
}

impl LocalCache {
    /// Open the cache stored at `path` with the default flush threshold.
    pub fn open(name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Self::with_max_dirty(name, path, defaults::DEFAULT_CACHE_MAX_DIRTY)
    }

    /// Open the cache stored at `path`, flushing after more than `max_dirty` changes.
    ///
    /// A missing file starts an empty cache. A blank file is deleted and also
    /// starts empty. Anything else must parse as a JSON string map.
    pub fn with_max_dirty(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        max_dirty: usize,
    ) -> Result<Self, CacheError> {
        let name = name.into();
        let path = path.into();
        let entries = load_entries(&path)?;
        info!(cache = %name, entries = entries.len(), path = %path.display(), "cache opened");
        Ok(Self {
            name,
            path,
            max_dirty: max_dirty.max(1),
            state: Mutex::new(LocalState { entries, dirty: 0 }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of changed entries not yet written.
    pub fn dirty(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).dirty
    }

    fn lock(&self) -> Result<MutexGuard<'_, LocalState>, CacheError> {
        self.state.lock().map_err(|_| CacheError::LockPoisoned {
            name: self.name.clone(),
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(CACHE_TEMP_SUFFIX);
        PathBuf::from(temp)
    }

    fn flush_locked(&self, state: &mut LocalState) -> Result<(), CacheError> {
        if state.dirty == 0 {
            return Ok(());
        }
        let serialized = serde_json::to_string(&state.entries).map_err(|e| {
            CacheError::Serialization {
                reason: e.to_string(),
            }
        })?;

        let temp = self.temp_path();
        fs::write(&temp, serialized).map_err(|e| io_error(&temp, e))?;
        fs::copy(&temp, &self.path).map_err(|e| io_error(&self.path, e))?;
        fs::remove_file(&temp).map_err(|e| io_error(&temp, e))?;

        debug!(cache = %self.name, entries = state.entries.len(), flushed = state.dirty, "cache written");
        state.dirty = 0;
        Ok(())
    }
}

impl ICache for LocalCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        Ok(self.lock()?.entries.get(key.local_key()).cloned())
    }

    fn put(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let mut state = self.lock()?;
        let previous = state.entries.insert(key.local_key().to_string(), value.clone());
        if previous.as_deref() != Some(value.as_str()) {
            state.dirty += 1;
        }
        if state.dirty > self.max_dirty {
            self.flush_locked(&mut state)?;
        }
        Ok(())
    }

    fn contains_key(&self, key: &CacheKey) -> Result<bool, CacheError> {
        Ok(self.lock()?.entries.contains_key(key.local_key()))
    }

    fn write(&self) -> Result<(), CacheError> {
        let mut state = self.lock()?;
        self.flush_locked(&mut state)
    }

    fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, CacheError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    if raw.trim().is_empty() {
        fs::remove_file(path).map_err(|e| io_error(path, e))?;
        debug!(path = %path.display(), "removed blank cache file");
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&raw).map_err(|e| CacheError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn io_error(path: &Path, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(content: &str) -> CacheKey {
        CacheKey::chat("gpt-4o-mini", 133742243, 0.0, content)
    }

    #[test]
    fn unchanged_put_is_not_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::open("c", dir.path().join("c.json")).unwrap();
        cache.put(&key("a"), "yes".into()).unwrap();
        cache.put(&key("a"), "yes".into()).unwrap();
        assert_eq!(cache.dirty(), 1);
        cache.put(&key("a"), "no".into()).unwrap();
        assert_eq!(cache.dirty(), 2);
    }

    #[test]
    fn counts_survive_a_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::open("c", dir.path().join("c.json")).unwrap();
        cache.put(&key("a"), "yes".into()).unwrap();
        cache.put(&key("b"), "no".into()).unwrap();

        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = cache.state.lock().unwrap();
                panic!("poison the cache lock");
            });
            assert!(poisoner.join().is_err());
        });

        assert!(cache.state.is_poisoned());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.dirty(), 2);
        assert!(matches!(cache.get(&key("a")), Err(CacheError::LockPoisoned { .. })));
    }

    #[test]
    fn temp_path_appends_suffix() {
        let cache = LocalCache::open("c", "/nonexistent/dir/c.json").unwrap();
        assert!(cache.temp_path().to_string_lossy().ends_with("c.json.tmp.json"));
    }
}
