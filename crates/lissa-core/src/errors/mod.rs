//! Error handling for LiSSA.
//! One error enum per subsystem, `thiserror` only.

pub mod cache_error;
pub mod classifier_error;
pub mod config_error;
pub mod embedding_error;
pub mod error_code;
pub mod evaluation_error;
pub mod lissa_error;
pub mod retrieval_error;
pub mod validation_error;

pub use cache_error::CacheError;
pub use classifier_error::ClassifierError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use error_code::LissaErrorCode;
pub use evaluation_error::EvaluationError;
pub use lissa_error::{LissaError, LissaResult};
pub use retrieval_error::RetrievalError;
pub use validation_error::ValidationError;
