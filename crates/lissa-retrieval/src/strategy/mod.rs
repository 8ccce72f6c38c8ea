//! Similarity strategies, selected by module name.

pub mod code_graph;
pub mod cosine;
pub mod max_results;
pub mod occurrence;
pub mod token;

use tracing::warn;

use lissa_core::config::ModuleConfiguration;
use lissa_core::context::ContextStore;
use lissa_core::errors::{ConfigError, RetrievalError};

pub use code_graph::CodeGraphStrategy;
pub use cosine::cosine_similarity;
pub use max_results::MaxResults;
pub use token::{TokenSimilarity, Tokenization};

use crate::entry::{ElementEmbedding, ScoredElement};

pub const COSINE_SIMILARITY: &str = "cosine_similarity";
pub const TOKEN_SIMILARITY: &str = "token_similarity";
pub const COSINE_TOKEN_SIMILARITY: &str = "cosine_token_similarity";
pub const OCCURRENCE_SIMILARITY: &str = "occurrence_similarity";
pub const CODE_GRAPH_STRATEGY: &str = "code_graph_strategy";
pub const CUSTOM: &str = "custom";

/// Closed set of similarity strategies. Higher scores mean more similar.
#[derive(Debug, Clone)]
pub enum RetrievalStrategy {
    Cosine {
        max_results: MaxResults,
    },
    Token {
        max_results: MaxResults,
        token: TokenSimilarity,
    },
    /// `token × cosine`, or `w·cosine + (1−w)·token` with a `cosine_weight`.
    CosineToken {
        max_results: MaxResults,
        token: TokenSimilarity,
        cosine_weight: Option<f32>,
    },
    Occurrence {
        max_results: MaxResults,
    },
    CodeGraph(CodeGraphStrategy),
}

impl RetrievalStrategy {
    pub fn from_config(config: &ModuleConfiguration, context: &ContextStore) -> Result<Self, ConfigError> {
        match config.name() {
            COSINE_SIMILARITY => Ok(Self::Cosine {
                max_results: MaxResults::from_config(config)?,
            }),
            CUSTOM => {
                warn!("retrieval strategy \"custom\" is kept for compatibility; using cosine similarity");
                Ok(Self::Cosine {
                    max_results: MaxResults::from_config(config)?,
                })
            }
            TOKEN_SIMILARITY => Ok(Self::Token {
                max_results: MaxResults::from_config(config)?,
                token: TokenSimilarity::from_config(config)?,
            }),
            COSINE_TOKEN_SIMILARITY => Ok(Self::CosineToken {
                max_results: MaxResults::from_config(config)?,
                token: TokenSimilarity::from_config(config)?,
                cosine_weight: cosine_weight(config)?,
            }),
            OCCURRENCE_SIMILARITY => Ok(Self::Occurrence {
                max_results: MaxResults::from_config(config)?,
            }),
            CODE_GRAPH_STRATEGY => Ok(Self::CodeGraph(CodeGraphStrategy::from_config(config, context)?)),
            other => Err(ConfigError::UnknownModule {
                kind: "retrieval strategy".to_string(),
                name: other.to_string(),
            }),
        }
    }

    /// Cosine strategy with the given cutoff.
    pub fn cosine(max_results: MaxResults) -> Self {
        Self::Cosine { max_results }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cosine { .. } => COSINE_SIMILARITY,
            Self::Token { .. } => TOKEN_SIMILARITY,
            Self::CosineToken { .. } => COSINE_TOKEN_SIMILARITY,
            Self::Occurrence { .. } => OCCURRENCE_SIMILARITY,
            Self::CodeGraph(_) => CODE_GRAPH_STRATEGY,
        }
    }

    /// Ranks `candidates` against `query`, best first. Equal scores keep candidate order.
    pub fn find_similar_elements(
        &self,
        query: &ElementEmbedding,
        candidates: &[ElementEmbedding],
    ) -> Result<Vec<ScoredElement>, RetrievalError> {
        match self {
            Self::Cosine { max_results } => Ok(max_results.apply(cosine::score(query, candidates)?)),
            Self::Token { max_results, token } => Ok(max_results.apply(token.score(query, candidates))),
            Self::CosineToken {
                max_results,
                token,
                cosine_weight,
            } => {
                let cosine = cosine::score(query, candidates)?;
                let tokens = token.score(query, candidates);
                let combined = cosine
                    .into_iter()
                    .zip(tokens)
                    .map(|((element, c), (_, t))| {
                        let score = match cosine_weight {
                            Some(w) => w * c + (1.0 - w) * t,
                            None => t * c,
                        };
                        (element, score)
                    })
                    .collect();
                Ok(max_results.apply(combined))
            }
            Self::Occurrence { max_results } => Ok(max_results.apply(occurrence::score(query, candidates))),
            Self::CodeGraph(strategy) => strategy.find(query, candidates),
        }
    }
}

fn cosine_weight(config: &ModuleConfiguration) -> Result<Option<f32>, ConfigError> {
    if !config.has_argument("cosine_weight") {
        return Ok(None);
    }
    let weight = config.argument_as_float_or("cosine_weight", 1.0)?;
    if !(0.0..=1.0).contains(&weight) {
        return Err(ConfigError::InvalidValue {
            field: format!("{}.cosine_weight", config.name()),
            message: format!("must be within [0, 1], got {weight}"),
        });
    }
    Ok(Some(weight as f32))
}
