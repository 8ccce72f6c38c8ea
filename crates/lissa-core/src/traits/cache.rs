use crate::errors::CacheError;
use crate::models::CacheKey;

/// Durable memoization of remote model calls.
///
/// Implementations serialize access internally; callers share one instance
/// behind an `Arc` and never touch entries except through this interface.
pub trait ICache: Send + Sync {
    /// Name of the cache (also its file stem for file-backed caches).
    fn name(&self) -> &str;

    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store a value. May trigger a flush once enough entries changed.
    fn put(&self, key: &CacheKey, value: String) -> Result<(), CacheError>;

    fn contains_key(&self, key: &CacheKey) -> Result<bool, CacheError>;

    /// Persist pending changes. A no-op when nothing changed.
    fn write(&self) -> Result<(), CacheError>;

    /// Number of entries currently held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
