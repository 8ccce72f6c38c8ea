use lissa_core::errors::RetrievalError;

use crate::entry::{ElementEmbedding, ScoredElement};

/// Cosine similarity of two vectors of equal length.
///
/// Accumulates in f64. A zero vector on either side scores 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RetrievalError> {
    if a.len() != b.len() {
        return Err(RetrievalError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())) as f32)
}

/// Scores every candidate by embedding cosine against the query, in candidate order.
pub(crate) fn score(
    query: &ElementEmbedding,
    candidates: &[ElementEmbedding],
) -> Result<Vec<ScoredElement>, RetrievalError> {
    candidates
        .iter()
        .map(|c| {
            cosine_similarity(&query.embedding, &c.embedding).map(|score| (c.element.clone(), score))
        })
        .collect()
}
