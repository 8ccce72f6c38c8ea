//! # lissa-core
//!
//! Foundation crate for the LiSSA trace-link recovery engine.
//! Defines the knowledge model, classification types, traits, errors, config, and context.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod knowledge;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::{LissaConfig, ModuleConfiguration};
pub use context::{ContextStore, ElementRetrieval};
pub use errors::{LissaError, LissaResult};
pub use knowledge::{Artifact, ArtifactType, Element, Knowledge, TraceLink};
pub use models::{CacheKey, CacheMode, ChatMessage, ClassificationResult, ClassificationTask};
