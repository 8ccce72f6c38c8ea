use lissa_core::errors::EmbeddingError;
use lissa_core::traits::IEmbeddingProvider;

/// Deterministic offline provider: the vector is derived from the blake3 hash
/// of the text, so equal texts always embed equally.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
}

impl MockEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }
}

impl IEmbeddingProvider for MockEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut reader = blake3::Hasher::new().update(text.as_bytes()).finalize_xof();
        let mut bytes = vec![0u8; self.dimensions * 2];
        reader.fill(&mut bytes);
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| f32::from(u16::from_le_bytes([pair[0], pair[1]])) / f32::from(u16::MAX) - 0.5)
            .collect())
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "mock"
    }
}
