//! Classification, chat, and cache-key data types shared across crates.

pub mod cache_key;
pub mod chat_message;
pub mod classification_result;
pub mod classification_task;

pub use cache_key::{CacheKey, CacheMode};
pub use chat_message::ChatMessage;
pub use classification_result::ClassificationResult;
pub use classification_task::ClassificationTask;
