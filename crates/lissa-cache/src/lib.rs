//! # lissa-cache
//!
//! Durable memoization of chat and embedding calls.
//!
//! - [`LocalCache`]: one JSON file per cache, flushed after a number of changed entries
//! - [`SqliteCache`]: write-through rows in a shared SQLite database
//! - [`CacheManager`]: names caches after their origin and model parameters
//!   and hands out shared instances

pub mod local_cache;
pub mod manager;
pub mod parameters;
pub mod sqlite_cache;

pub use local_cache::LocalCache;
pub use manager::CacheManager;
pub use parameters::{CacheParameter, ClassifierCacheParameter, EmbeddingCacheParameter};
pub use sqlite_cache::SqliteCache;
