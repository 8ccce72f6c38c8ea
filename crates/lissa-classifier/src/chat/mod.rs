//! Chat backends used by the model-backed classifiers.

pub mod cached;
pub mod ollama;
pub mod openai;
pub mod platform;

pub use cached::CachedChat;
pub use ollama::OllamaChat;
pub use openai::OpenAiCompatibleChat;
pub use platform::{ChatModelProvider, ChatPlatform};
