//! Embedding providers.

pub mod mock;
pub mod ollama;
pub mod openai;

pub use mock::MockEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;

pub const OLLAMA: &str = "ollama";
pub const OPENAI: &str = "openai";
pub const OPENWEBUI: &str = "openwebui";
pub const MOCK: &str = "mock";
