//! Explicit shared context passed into component constructors.

pub mod context_store;
pub mod element_retrieval;

pub use context_store::{Context, ContextStore};
pub use element_retrieval::ElementRetrieval;
