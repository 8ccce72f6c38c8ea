//! Hands out one shared cache per `(origin, parameters)` name.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use lissa_core::config::{defaults, CacheBackend, LissaConfig};
use lissa_core::constants::{CACHE_NAME_COLON_REPLACEMENT, CACHE_NAME_SEPARATOR};
use lissa_core::errors::CacheError;
use lissa_core::traits::ICache;

use crate::local_cache::LocalCache;
use crate::parameters::CacheParameter;
use crate::sqlite_cache::SqliteCache;

/// File name of the shared database used by the SQLite backend.
pub const SQLITE_DATABASE_FILE: &str = "lissa-cache.sqlite";

struct RegisteredCache {
    parameters: String,
    cache: Arc<dyn ICache>,
}

/// Owns every cache of a run.
///
/// Passed explicitly to the modules that need it; there is no process-wide instance.
pub struct CacheManager {
    directory: PathBuf,
    backend: CacheBackend,
    max_dirty: usize,
    caches: Mutex<HashMap<String, RegisteredCache>>,
}

impl CacheManager {
    /// JSON-file caches under `directory`, which is created if missing.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Self::with_backend(directory, CacheBackend::Json, defaults::DEFAULT_CACHE_MAX_DIRTY)
    }

    pub fn from_config(config: &LissaConfig) -> Result<Self, CacheError> {
        Self::with_backend(&config.cache_dir, config.cache_backend, config.cache_max_dirty)
    }

    pub fn with_backend(
        directory: impl Into<PathBuf>,
        backend: CacheBackend,
        max_dirty: usize,
    ) -> Result<Self, CacheError> {
        let directory = directory.into();
        if directory.exists() && !directory.is_dir() {
            return Err(CacheError::NotADirectory {
                path: directory.display().to_string(),
            });
        }
        fs::create_dir_all(&directory).map_err(|source| CacheError::Io {
            path: directory.display().to_string(),
            source,
        })?;
        info!(directory = %directory.display(), ?backend, "cache manager ready");
        Ok(Self {
            directory,
            backend,
            max_dirty,
            caches: Mutex::new(HashMap::new()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Cache name for `origin` and `parameters`, with `:` made file-system safe.
    pub fn cache_name(origin: &str, parameters: &dyn CacheParameter) -> String {
        format!("{origin}{CACHE_NAME_SEPARATOR}{}", parameters.parameters())
            .replace(':', CACHE_NAME_COLON_REPLACEMENT)
    }

    /// The cache for `origin` under `parameters`, opened on first request.
    ///
    /// Fails if a cache of the same name was already handed out with different
    /// parameters.
    pub fn get_cache(
        &self,
        origin: &str,
        parameters: &dyn CacheParameter,
    ) -> Result<Arc<dyn ICache>, CacheError> {
        let name = Self::cache_name(origin, parameters);
        let requested = format!("{parameters:?}");

        let mut caches = self.caches.lock().map_err(|_| CacheError::LockPoisoned {
            name: "cache manager".to_string(),
        })?;
        if let Some(existing) = caches.get(&name) {
            if existing.parameters != requested {
                return Err(CacheError::ParameterConflict {
                    name,
                    existing: existing.parameters.clone(),
                    requested,
                });
            }
            return Ok(Arc::clone(&existing.cache));
        }

        let cache: Arc<dyn ICache> = match self.backend {
            CacheBackend::Json => Arc::new(LocalCache::with_max_dirty(
                name.clone(),
                self.directory.join(format!("{name}.json")),
                self.max_dirty,
            )?),
            CacheBackend::Sqlite => Arc::new(SqliteCache::open(
                name.clone(),
                &self.directory.join(SQLITE_DATABASE_FILE),
            )?),
        };
        caches.insert(
            name,
            RegisteredCache {
                parameters: requested,
                cache: Arc::clone(&cache),
            },
        );
        Ok(cache)
    }

    /// Write every cache. All caches are attempted; the first failure is returned.
    pub fn flush(&self) -> Result<(), CacheError> {
        let caches = self.caches.lock().map_err(|_| CacheError::LockPoisoned {
            name: "cache manager".to_string(),
        })?;
        let mut first_error = None;
        for registered in caches.values() {
            if let Err(e) = registered.cache.write() {
                warn!(cache = registered.cache.name(), error = %e, "cache flush failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Names of all caches opened so far, sorted.
    pub fn cache_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .caches
            .lock()
            .map(|caches| caches.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}
