//! Yes/no prompt classifier.

use std::sync::Arc;

use tracing::debug;

use lissa_cache::CacheManager;
use lissa_core::config::ModuleConfiguration;
use lissa_core::errors::{ClassifierError, LissaError};
use lissa_core::knowledge::Element;
use lissa_core::models::ClassificationResult;

use super::{fill_template, PairClassifier};
use crate::chat::{CachedChat, ChatModelProvider};

pub const SIMPLE_CLASSIFIER: &str = "simple";
const CACHE_ORIGIN: &str = "SimpleClassifier";
const TEMPLATE_KEY: &str = "template";

pub const DEFAULT_TEMPLATE: &str = "Question: Here are two parts of software development artifacts.

{source_type}: '''{source_content}'''

{target_type}: '''{target_content}'''
Are they related?

Answer with 'yes' or 'no'.
";

const THINK_START: &str = "<think>";
const THINK_END: &str = "</think>";

/// Asks the model whether two elements are related; any `yes` in the answer accepts.
pub struct SimpleClassifier {
    name: String,
    chat: CachedChat,
    threads: usize,
    template: String,
}

impl SimpleClassifier {
    /// Reads `model`, `seed`, `temperature`, and `template` (default [`DEFAULT_TEMPLATE`]).
    pub fn from_config(config: &ModuleConfiguration, caches: &CacheManager) -> Result<Self, LissaError> {
        let provider = ChatModelProvider::from_config(config)?;
        let template = config.argument_as_string_or(TEMPLATE_KEY, DEFAULT_TEMPLATE)?;
        let parameter = provider.cache_parameter();
        let cache = caches.get_cache(CACHE_ORIGIN, &parameter)?;
        let chat = CachedChat::new(provider.create_chat_model()?, cache, parameter);
        Ok(Self::new(config.name(), chat, provider.threads(), template))
    }

    pub fn new(name: impl Into<String>, chat: CachedChat, threads: usize, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chat,
            threads: threads.max(1),
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl PairClassifier for SimpleClassifier {
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
        let request = fill_template(&self.template, source, target);
        debug!(
            model = self.chat.model_name(),
            source = source.identifier(),
            target = target.identifier(),
            "classifying"
        );
        let response = self.chat.chat_text(&request)?;
        if is_related(&response) {
            Ok(Some(ClassificationResult::accepted(
                Arc::clone(source),
                Arc::clone(target),
            )))
        } else {
            Ok(None)
        }
    }
}

/// Drops a leading `<think>…</think>` block, then looks for `yes`.
fn is_related(response: &str) -> bool {
    let answer = match response.find(THINK_END) {
        Some(end) if response.starts_with(THINK_START) => response[end + THINK_END.len()..].trim(),
        _ => response,
    };
    answer.to_lowercase().contains("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_answers() {
        assert!(is_related("Yes, they are related."));
        assert!(!is_related("No."));
    }

    #[test]
    fn thinking_is_ignored() {
        assert!(!is_related("<think>yes? maybe yes</think>\nno"));
        assert!(is_related("<think>hmm</think> YES"));
    }

    #[test]
    fn think_block_elsewhere_is_kept() {
        assert!(is_related("No <think>yes</think>"));
    }
}
