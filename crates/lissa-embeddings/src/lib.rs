//! # lissa-embeddings
//!
//! Turns element contents into embedding vectors.
//!
//! Every provider sits behind [`IEmbeddingProvider`](lissa_core::traits::IEmbeddingProvider);
//! [`CachedEmbeddingCreator`] adds the persistent cache, an in-memory L1,
//! chunked parallel creation, and truncation of over-long inputs.

pub mod creator;
pub mod providers;
pub mod tokens;

pub use creator::CachedEmbeddingCreator;
pub use providers::{MockEmbeddingProvider, OllamaEmbeddingProvider, OpenAiEmbeddingProvider};
pub use tokens::TokenCounter;
