//! Property tests for core value invariants.

use std::sync::Arc;

use proptest::prelude::*;

use lissa_core::knowledge::Element;
use lissa_core::models::{ClassificationResult, ClassificationTask};

fn element(id: &str) -> Arc<Element> {
    Arc::new(Element::new(id, "requirement", "content", 0, None, true).unwrap())
}

proptest! {
    #[test]
    fn prop_confidence_in_range_round_trips(c in 0.0f64..=1.0) {
        let result = ClassificationResult::new(element("s"), element("t"), c).unwrap();
        prop_assert_eq!(result.confidence(), c);
    }

    #[test]
    fn prop_confidence_above_one_rejected(c in 1.0f64..1e9) {
        prop_assume!(c > 1.0);
        prop_assert!(ClassificationResult::new(element("s"), element("t"), c).is_err());
    }

    #[test]
    fn prop_confidence_below_zero_rejected(c in -1e9f64..0.0) {
        prop_assert!(ClassificationResult::new(element("s"), element("t"), c).is_err());
    }

    #[test]
    fn prop_task_order_is_total(
        a in ("[a-c]{1,2}", "[a-c]{1,2}", any::<bool>()),
        b in ("[a-c]{1,2}", "[a-c]{1,2}", any::<bool>()),
    ) {
        let ta = ClassificationTask::new(element(&a.0), element(&a.1), a.2);
        let tb = ClassificationTask::new(element(&b.0), element(&b.1), b.2);
        let expected = (a.0.clone(), a.1.clone(), a.2).cmp(&(b.0.clone(), b.1.clone(), b.2));
        prop_assert_eq!(ta.cmp(&tb), expected);
    }

    #[test]
    fn prop_child_ids_extend_parent(index in 0usize..1000) {
        let root = element("doc");
        let child = Element::from_parent(&root, index, "part", true).unwrap();
        prop_assert_eq!(child.identifier(), format!("doc${index}"));
        prop_assert_eq!(child.granularity(), 1);
    }
}
