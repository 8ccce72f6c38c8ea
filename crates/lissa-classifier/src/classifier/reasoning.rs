//! Chain-of-thought classifier answering inside `<trace>` tags.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use lissa_cache::CacheManager;
use lissa_core::config::ModuleConfiguration;
use lissa_core::errors::{ClassifierError, LissaError};
use lissa_core::knowledge::Element;
use lissa_core::models::{ChatMessage, ClassificationResult};

use super::{fill_template, PairClassifier};
use crate::chat::{CachedChat, ChatModelProvider};

pub const REASONING_CLASSIFIER: &str = "reasoning";
const CACHE_ORIGIN: &str = "ReasoningClassifier";
const PROMPT_KEY: &str = "prompt";

pub const SYSTEM_MESSAGE: &str =
    "Your job is to determine if there is a traceability link between two artifacts of a system.";

/// Built-in prompts, selectable by index through the `prompt` argument.
pub const PROMPTS: [&str; 3] = [
    "Below are two artifacts from the same software system. Is there a traceability link between (1) and (2)? Give your reasoning and then answer with 'yes' or 'no' enclosed in <trace> </trace>.\n (1) {source_type}: '''{source_content}''' \n (2) {target_type}: '''{target_content}''' ",
    "Below are two artifacts from the same software system. Is there a conceivable traceability link between (1) and (2)? Give your reasoning and then answer with 'yes' or 'no' enclosed in <trace> </trace>.\n (1) {source_type}: '''{source_content}''' \n (2) {target_type}: '''{target_content}''' ",
    "Below are two artifacts from the same software system.\n Is there a traceability link between (1) and (2)? Give your reasoning and then answer with 'yes' or 'no' enclosed in <trace> </trace>. Only answer yes if you are absolutely certain.\n (1) {source_type}: '''{source_content}''' \n (2) {target_type}: '''{target_content}''' ",
];

static TRACE_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<trace>(.*?)</trace>").ok());

pub struct ReasoningClassifier {
    name: String,
    chat: CachedChat,
    threads: usize,
    prompt: String,
    use_original_artifacts: bool,
    use_system_message: bool,
}

impl ReasoningClassifier {
    /// Reads `model`, `seed`, `temperature`, `prompt` (index into [`PROMPTS`] or literal text),
    /// `use_original_artifacts` (default false), and `use_system_message` (default true).
    pub fn from_config(config: &ModuleConfiguration, caches: &CacheManager) -> Result<Self, LissaError> {
        let provider = ChatModelProvider::from_config(config)?;
        let prompt = config.argument_as_string_by_index(PROMPT_KEY, 0, &PROMPTS)?;
        let use_original_artifacts = config.argument_as_bool_or("use_original_artifacts", false)?;
        let use_system_message = config.argument_as_bool_or("use_system_message", true)?;
        let parameter = provider.cache_parameter();
        let cache = caches.get_cache(CACHE_ORIGIN, &parameter)?;
        let chat = CachedChat::new(provider.create_chat_model()?, cache, parameter);
        Ok(Self::new(config.name(), chat, provider.threads(), prompt)
            .with_original_artifacts(use_original_artifacts)
            .with_system_message(use_system_message))
    }

    pub fn new(name: impl Into<String>, chat: CachedChat, threads: usize, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chat,
            threads: threads.max(1),
            prompt: prompt.into(),
            use_original_artifacts: false,
            use_system_message: true,
        }
    }

    /// Prompt with the target's root artifact instead of the retrieved element.
    pub fn with_original_artifacts(mut self, enabled: bool) -> Self {
        self.use_original_artifacts = enabled;
        self
    }

    pub fn with_system_message(mut self, enabled: bool) -> Self {
        self.use_system_message = enabled;
        self
    }

    fn messages(&self, source: &Element, target: &Element) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if self.use_system_message {
            messages.push(ChatMessage::System(SYSTEM_MESSAGE.to_string()));
        }
        messages.push(ChatMessage::User(fill_template(&self.prompt, source, target)));
        messages
    }
}

impl PairClassifier for ReasoningClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn threads(&self) -> usize {
        self.threads
    }

    fn classify_pair(
        &self,
        source: &Arc<Element>,
        target: &Arc<Element>,
    ) -> Result<Option<ClassificationResult>, ClassifierError> {
        let target = if self.use_original_artifacts {
            target.root()
        } else {
            Arc::clone(target)
        };
        let messages = self.messages(source, &target);
        let response = self.chat.chat(&ChatMessage::representation(&messages), &messages)?;
        if is_related(&response) {
            Ok(Some(ClassificationResult::accepted(Arc::clone(source), target)))
        } else {
            Ok(None)
        }
    }
}

/// `yes` inside the first `<trace>` block, tags matched case-insensitively.
fn is_related(response: &str) -> bool {
    match TRACE_TAG.as_ref().and_then(|pattern| pattern.find(response)) {
        Some(m) => m.as_str().to_lowercase().contains("yes"),
        None => {
            debug!(response, "no trace tag in response");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_trace_block_counts() {
        assert!(is_related("Reasoning... <trace>yes</trace> <trace>no</trace>"));
        assert!(!is_related("<TRACE> No </TRACE> but yes elsewhere <trace>yes</trace>"));
    }

    #[test]
    fn missing_trace_tag_rejects() {
        assert!(!is_related("yes, definitely"));
    }

    #[test]
    fn multiline_trace_block() {
        assert!(is_related("<trace>\nYes\n</trace>"));
    }
}
