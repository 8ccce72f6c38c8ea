//! Property tests for similarity scoring and ranking.

use std::sync::Arc;

use proptest::prelude::*;

use lissa_core::knowledge::Element;
use lissa_retrieval::strategy::{cosine_similarity, MaxResults, TokenSimilarity, Tokenization};
use lissa_retrieval::{ElementEmbedding, RetrievalStrategy};

fn vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-100.0f32..100.0, dim)
}

proptest! {
    #[test]
    fn cosine_is_symmetric((a, b) in (1usize..32).prop_flat_map(|d| (vector(d), vector(d)))) {
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!((-1.0001..=1.0001).contains(&ab));
    }

    #[test]
    fn cosine_self_similarity_is_one(a in vector(16)) {
        prop_assume!(a.iter().any(|x| *x != 0.0));
        let s = cosine_similarity(&a, &a).unwrap();
        prop_assert!((s - 1.0).abs() < 1e-5);
    }

    #[test]
    fn ranking_is_sorted_and_bounded(
        embeddings in prop::collection::vec(vector(4), 0..40),
        query in vector(4),
        limit in 1usize..15,
    ) {
        let candidates: Vec<ElementEmbedding> = embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let element = Element::new(format!("e{i}"), "requirement", "c", 0, None, true).unwrap();
                ElementEmbedding::new(Arc::new(element), e)
            })
            .collect();
        let query = ElementEmbedding::new(
            Arc::new(Element::new("q", "requirement", "q", 0, None, true).unwrap()),
            query,
        );
        let ranked = RetrievalStrategy::cosine(MaxResults::Limited(limit))
            .find_similar_elements(&query, &candidates)
            .unwrap();
        prop_assert_eq!(ranked.len(), candidates.len().min(limit));
        prop_assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn token_similarity_is_symmetric(a in "[a-c ]{0,30}", b in "[a-c ]{0,30}") {
        let token = TokenSimilarity { tokenization: Tokenization::Word, ..TokenSimilarity::default() };
        let ab = token.similarity(&a, &b);
        let ba = token.similarity(&b, &a);
        if a.split_whitespace().count() != b.split_whitespace().count() {
            prop_assert_eq!(ab, ba);
        }
        prop_assert!(ab >= 0.0);
    }
}
