use std::sync::Arc;

use moka::sync::Cache;
use tiktoken_rs::CoreBPE;

use lissa_core::errors::EmbeddingError;

/// BPE token counter for one embedding model.
/// Counts are cached per blake3 content hash.
pub struct TokenCounter {
    bpe: Arc<CoreBPE>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    /// Counter using the encoding tiktoken associates with `model`.
    pub fn for_model(model: &str, cache_capacity: u64) -> Result<Self, EmbeddingError> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            EmbeddingError::TokenizerUnavailable {
                model: model.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self::with_bpe(bpe, cache_capacity))
    }

    fn with_bpe(bpe: CoreBPE, cache_capacity: u64) -> Self {
        Self {
            bpe: Arc::new(bpe),
            cache: Cache::new(cache_capacity),
        }
    }

    /// Count tokens in the given text (uncached).
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    pub fn count_cached(&self, text: &str) -> usize {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        self.cache.get_with(hash, || self.count(text))
    }

    /// Number of memoized counts.
    pub fn cached_counts(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    /// Longest prefix of `text` with fewer than `max_tokens` tokens, found by
    /// binary search over character positions. `None` when `text` already fits.
    pub fn truncate_below(&self, text: &str, max_tokens: usize) -> Option<String> {
        if self.count_cached(text) < max_tokens {
            return None;
        }
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let (mut left, mut right) = (0usize, boundaries.len() - 1);
        while left < right {
            let mid = left + (right - left) / 2;
            if self.count(&text[..boundaries[mid]]) >= max_tokens {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        // `left` is the first prefix at or over the limit; step back one character.
        let end = boundaries[left.saturating_sub(1)];
        Some(text[..end].to_string())
    }
}
