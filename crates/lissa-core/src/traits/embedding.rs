use crate::errors::EmbeddingError;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Model identifier used for cache partitioning.
    fn model_name(&self) -> &str;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
