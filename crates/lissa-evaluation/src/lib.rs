//! # lissa-evaluation
//!
//! Wires every stage of a run together and scores the result.
//!
//! - [`Evaluation`]: embeddings → stores → classification → aggregation → statistics
//! - [`gold_standard`]: ground-truth CSV loading
//! - [`statistics`]: precision / recall / F1 and the run's output files

pub mod gold_standard;
pub mod pipeline;
pub mod statistics;

pub use gold_standard::load_gold_standard;
pub use pipeline::{Evaluation, EvaluationOutcome};
pub use statistics::Statistics;
