//! Content-based similarity from overlapping token runs. Ignores embeddings.

pub mod sequence;
pub mod tokenization;

use rayon::prelude::*;
use tracing::debug;

use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::errors::ConfigError;

pub use sequence::{analyze, Match, SequenceAnalysis};
pub use tokenization::Tokenization;

use crate::entry::{ElementEmbedding, ScoredElement};

/// Parameters of the token-overlap score.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSimilarity {
    pub tokenization: Tokenization,
    pub minimum_match_length: usize,
    pub exponent: f64,
}

impl Default for TokenSimilarity {
    fn default() -> Self {
        Self {
            tokenization: Tokenization::Word,
            minimum_match_length: defaults::DEFAULT_MINIMUM_MATCH_LENGTH as usize,
            exponent: defaults::DEFAULT_TOKEN_EXPONENT,
        }
    }
}

impl TokenSimilarity {
    pub fn from_config(config: &ModuleConfiguration) -> Result<Self, ConfigError> {
        let tokenization = config
            .argument_as_string_or("tokenization", defaults::DEFAULT_TOKENIZATION)?
            .parse()?;
        let minimum_match_length = config
            .argument_as_int_or("minimum_match_length", defaults::DEFAULT_MINIMUM_MATCH_LENGTH)?;
        if minimum_match_length < 1 {
            return Err(ConfigError::InvalidValue {
                field: format!("{}.minimum_match_length", config.name()),
                message: "must be at least 1".to_string(),
            });
        }
        let exponent = config.argument_as_float_or("exponent", defaults::DEFAULT_TOKEN_EXPONENT)?;
        Ok(Self {
            tokenization,
            minimum_match_length: minimum_match_length as usize,
            exponent,
        })
    }

    /// Overlap score of two contents.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = self.tokenization.tokenize(a);
        let b = self.tokenization.tokenize(b);
        analyze(&a, &b, self.minimum_match_length, self.exponent).score
    }

    /// Scores every candidate against the query, in candidate order.
    pub(crate) fn score(&self, query: &ElementEmbedding, candidates: &[ElementEmbedding]) -> Vec<ScoredElement> {
        let query_tokens = self.tokenization.tokenize(query.element.content());
        let scored: Vec<ScoredElement> = candidates
            .par_iter()
            .map(|candidate| {
                let tokens = self.tokenization.tokenize(candidate.element.content());
                let analysis = analyze(&query_tokens, &tokens, self.minimum_match_length, self.exponent);
                (candidate.element.clone(), analysis.score as f32)
            })
            .collect();
        debug!(
            query = query.element.identifier(),
            candidates = scored.len(),
            tokenization = %self.tokenization,
            "token similarity computed"
        );
        scored
    }
}
