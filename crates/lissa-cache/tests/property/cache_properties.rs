//! Property tests for the JSON file cache.

use std::collections::BTreeMap;

use proptest::prelude::*;

use lissa_cache::LocalCache;
use lissa_core::models::CacheKey;
use lissa_core::traits::ICache;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn last_put_wins_and_survives_reopen(
        ops in prop::collection::vec(("[a-e]{1,3}", "[a-z0-9]{0,8}"), 1..80)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let cache = LocalCache::with_max_dirty("p", &path, 7).unwrap();
        let mut expected = BTreeMap::new();
        for (content, value) in &ops {
            cache.put(&CacheKey::embedding("m", content.as_str()), value.clone()).unwrap();
            expected.insert(content.clone(), value.clone());
        }
        cache.write().unwrap();

        let reopened = LocalCache::open("p", &path).unwrap();
        prop_assert_eq!(reopened.len(), expected.len());
        for (content, value) in &expected {
            let got = reopened.get(&CacheKey::embedding("m", content.as_str())).unwrap();
            prop_assert_eq!(got.as_deref(), Some(value.as_str()));
        }
    }

    #[test]
    fn dirty_never_exceeds_threshold(
        contents in prop::collection::vec("[a-z]{1,6}", 0..120),
        max_dirty in 1usize..20,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::with_max_dirty("p", dir.path().join("p.json"), max_dirty).unwrap();
        for content in &contents {
            cache.put(&CacheKey::embedding("m", content.as_str()), content.clone()).unwrap();
            prop_assert!(cache.dirty() <= max_dirty);
        }
    }
}
