use std::sync::Arc;

use proptest::prelude::*;

use lissa_classifier::classifier::classify_pairs;
use lissa_classifier::{CandidatePair, MultiStageClassifier, PairClassifier};
use lissa_core::errors::ClassifierError;
use lissa_core::knowledge::Element;
use lissa_core::models::ClassificationResult;

/// Accepts targets whose numeric suffix is divisible by `modulus`.
struct Divisible {
    modulus: usize,
    threads: usize,
}

impl PairClassifier for Divisible {
    fn name(&self) -> &str {
        "divisible"
    }

    fn threads(&self) -> usize {
        self.threads
    }

    fn classify_pair(
        &self,
        source: &Arc<Element>,
        target: &Arc<Element>,
    ) -> Result<Option<ClassificationResult>, ClassifierError> {
        let n: usize = target.identifier()[1..].parse().unwrap_or(1);
        Ok((n % self.modulus == 0).then(|| ClassificationResult::accepted(source.clone(), target.clone())))
    }
}

fn pairs(n: usize) -> Vec<CandidatePair> {
    let source = Arc::new(Element::new("S", "requirement", "s", 0, None, true).unwrap());
    (0..n)
        .map(|i| {
            let target = Arc::new(Element::new(format!("T{i}"), "requirement", "t", 0, None, true).unwrap());
            (Arc::clone(&source), target)
        })
        .collect()
}

proptest! {
    #[test]
    fn results_follow_task_order_for_any_thread_count(n in 0usize..60, threads in 1usize..12, modulus in 1usize..5) {
        let classifier = Divisible { modulus, threads };
        let results = classify_pairs(&classifier, &pairs(n)).unwrap();
        let expected: Vec<String> = (0..n).filter(|i| i % modulus == 0).map(|i| format!("T{i}")).collect();
        let actual: Vec<String> = results.iter().map(|r| r.target().identifier().to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn unanimous_stage_equals_single_classifier(n in 0usize..40, members in 1usize..5, modulus in 1usize..4) {
        let stage: Vec<Box<dyn PairClassifier>> = (0..members)
            .map(|_| Box::new(Divisible { modulus, threads: 1 }) as Box<dyn PairClassifier>)
            .collect();
        let cascade = MultiStageClassifier::new(vec![stage]).unwrap().classify(&pairs(n)).unwrap();
        let single = classify_pairs(&Divisible { modulus, threads: 1 }, &pairs(n)).unwrap();
        let cascade_ids: Vec<&str> = cascade.iter().map(|r| r.target().identifier()).collect();
        let single_ids: Vec<&str> = single.iter().map(|r| r.target().identifier()).collect();
        prop_assert_eq!(cascade_ids, single_ids);
    }

    #[test]
    fn later_stages_only_narrow(n in 0usize..40, first in 1usize..4, second in 1usize..4) {
        let one = MultiStageClassifier::new(vec![vec![Box::new(Divisible { modulus: first, threads: 1 }) as Box<dyn PairClassifier>]]).unwrap();
        let two = MultiStageClassifier::new(vec![
            vec![Box::new(Divisible { modulus: first, threads: 1 }) as Box<dyn PairClassifier>],
            vec![Box::new(Divisible { modulus: second, threads: 1 }) as Box<dyn PairClassifier>],
        ]).unwrap();
        let wide = one.classify(&pairs(n)).unwrap();
        let narrow = two.classify(&pairs(n)).unwrap();
        prop_assert!(narrow.len() <= wide.len());
        for result in &narrow {
            prop_assert!(wide.iter().any(|w| w.target().identifier() == result.target().identifier()));
        }
    }
}
