use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use lissa_aggregator::AnyConnectionAggregator;
use lissa_core::knowledge::Element;
use lissa_core::models::ClassificationResult;

fn tree(prefix: &str, roots: usize) -> Vec<Arc<Element>> {
    let mut elements = Vec::new();
    for r in 0..roots {
        let root = Arc::new(Element::new(format!("{prefix}{r}"), "artifact", "root", 0, None, true).unwrap());
        for c in 0..3 {
            elements.push(Arc::new(Element::from_parent(&root, c, "child", true).unwrap()));
        }
        elements.push(root);
    }
    elements
}

proptest! {
    #[test]
    fn links_are_unique_and_permutation_invariant(
        picks in prop::collection::vec((0usize..12, 0usize..16), 0..40),
        seed in any::<u64>(),
    ) {
        let sources = tree("s", 3);
        let targets = tree("t", 4);
        let results: Vec<ClassificationResult> = picks
            .iter()
            .map(|&(s, t)| ClassificationResult::accepted(Arc::clone(&sources[s]), Arc::clone(&targets[t])))
            .collect();

        let mut shuffled = results.clone();
        let len = shuffled.len();
        if len > 1 {
            let mut state = seed;
            for i in (1..len).rev() {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                shuffled.swap(i, (state >> 33) as usize % (i + 1));
            }
        }

        let aggregator = AnyConnectionAggregator::default();
        let links = aggregator.aggregate(&results);
        prop_assert_eq!(&links, &aggregator.aggregate(&shuffled));

        let expected: HashSet<(String, String)> = results
            .iter()
            .map(|r| (r.source().root().identifier().to_string(), r.target().root().identifier().to_string()))
            .collect();
        prop_assert_eq!(links.len(), expected.len());
        for link in &links {
            prop_assert!(expected.contains(&(link.source_id.clone(), link.target_id.clone())));
        }
    }
}
