//! SQLite-backed cache. Every `put` is committed immediately, so an
//! interrupted run never loses more than the call in flight.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use lissa_core::errors::CacheError;
use lissa_core::models::CacheKey;
use lissa_core::traits::ICache;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cache_entries (
    cache_name TEXT NOT NULL,
    local_key  TEXT NOT NULL,
    value      TEXT NOT NULL,
    PRIMARY KEY (cache_name, local_key)
) WITHOUT ROWID;
";

/// One named cache inside a (possibly shared) SQLite database.
pub struct SqliteCache {
    name: String,
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open (or create) the database at `path` and attach to the cache `name`.
    pub fn open(name: impl Into<String>, path: &Path) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(to_cache_err)?;
        Self::init(name.into(), conn)
    }

    /// In-memory database, mostly for tests.
    pub fn open_in_memory(name: impl Into<String>) -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory().map_err(to_cache_err)?;
        Self::init(name.into(), conn)
    }

    fn init(name: String, conn: Connection) -> Result<Self, CacheError> {
        apply_pragmas(&conn)?;
        conn.execute_batch(SCHEMA).map_err(to_cache_err)?;
        Ok(Self {
            name,
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CacheError> {
        self.conn.lock().map_err(|_| CacheError::LockPoisoned {
            name: self.name.clone(),
        })
    }
}

impl ICache for SqliteCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT value FROM cache_entries WHERE cache_name = ?1 AND local_key = ?2",
            params![self.name, key.local_key()],
            |row| row.get(0),
        )
        .optional()
        .map_err(to_cache_err)
    }

    fn put(&self, key: &CacheKey, value: String) -> Result<(), CacheError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO cache_entries (cache_name, local_key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(cache_name, local_key) DO UPDATE SET value = excluded.value",
            params![self.name, key.local_key(), value],
        )
        .map_err(to_cache_err)?;
        debug!(cache = %self.name, "sqlite cache insert");
        Ok(())
    }

    fn contains_key(&self, key: &CacheKey) -> Result<bool, CacheError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM cache_entries WHERE cache_name = ?1 AND local_key = ?2)",
            params![self.name, key.local_key()],
            |row| row.get(0),
        )
        .map_err(to_cache_err)
    }

    // Rows are committed on insert.
    fn write(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn len(&self) -> usize {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE cache_name = ?1",
            params![self.name],
            |row| row.get::<_, i64>(0),
        )
        .map(|n| n.max(0) as usize)
        .unwrap_or(0)
    }
}

fn apply_pragmas(conn: &Connection) -> Result<(), CacheError> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;
         PRAGMA temp_store = MEMORY;",
    )
    .map_err(to_cache_err)
}

fn to_cache_err(e: rusqlite::Error) -> CacheError {
    CacheError::Sqlite {
        message: e.to_string(),
    }
}
