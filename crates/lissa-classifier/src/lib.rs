//! # lissa-classifier
//!
//! Decides which retrieved (source, target) candidates are trace links.
//!
//! - `chat`: chat platforms, HTTP clients, and the memoizing [`CachedChat`]
//! - `classifier`: mock, simple, reasoning, and multi-stage classifiers

pub mod chat;
pub mod classifier;

pub use chat::{CachedChat, ChatModelProvider, ChatPlatform};
pub use classifier::{
    create_classification_tasks, CandidatePair, Classifier, MockClassifier, MultiStageClassifier,
    PairClassifier, ReasoningClassifier, SimpleClassifier,
};
