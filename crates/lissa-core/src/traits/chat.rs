use crate::errors::ClassifierError;
use crate::models::ChatMessage;

/// A remote (or mocked) chat-completion backend.
pub trait IChatModel: Send + Sync {
    /// Send a conversation and return the assistant's text.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String, ClassifierError>;

    /// Model identifier sent to the backend.
    fn model_name(&self) -> &str;

    /// Human-readable platform name.
    fn platform(&self) -> &str;
}
