use serde::{Deserialize, Serialize};

/// One message of a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum ChatMessage {
    System(String),
    User(String),
}

impl ChatMessage {
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::System(text) | Self::User(text) => text,
        }
    }

    /// Deterministic textual form of a conversation, used as cache payload.
    pub fn representation(messages: &[ChatMessage]) -> String {
        let parts: Vec<String> = messages
            .iter()
            .map(|m| format!("{} {{ text = {:?} }}", m.role(), m.text()))
            .collect();
        format!("[{}]", parts.join(", "))
    }
}
