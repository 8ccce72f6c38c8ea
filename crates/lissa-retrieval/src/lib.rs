//! # lissa-retrieval
//!
//! Element stores holding `(element, embedding)` pairs and the similarity
//! strategies target stores are queried with.
//!
//! - [`SourceElementStore`]: enumerable, never queried by similarity
//! - [`TargetElementStore`]: queried through a [`RetrievalStrategy`]
//! - [`strategy`]: cosine, token overlap, cosine × token, occurrence, code graph

pub mod entry;
pub mod store;
pub mod strategy;

pub use entry::{ElementEmbedding, ScoredElement};
pub use store::{ElementStore, SourceElementStore, TargetElementStore};
pub use strategy::RetrievalStrategy;
