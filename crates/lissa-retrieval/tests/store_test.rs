use std::sync::Arc;

use lissa_core::config::ModuleConfiguration;
use lissa_core::context::ContextStore;
use lissa_core::errors::{RetrievalError, ValidationError};
use lissa_core::knowledge::{Artifact, ArtifactType, Element};
use lissa_retrieval::{ElementEmbedding, SourceElementStore, TargetElementStore};

fn root(id: &str, content: &str) -> Arc<Element> {
    let artifact = Artifact::new(id, ArtifactType::Requirement, content).unwrap();
    Arc::new(Element::from_artifact(&artifact, true).unwrap())
}

fn target_store(max_results: &str) -> TargetElementStore {
    let config = ModuleConfiguration::named("cosine_similarity").with_arg("max_results", max_results);
    TargetElementStore::new(&config, &ContextStore::new()).unwrap()
}

#[test]
fn cosine_top_one_picks_parallel_vector() {
    let mut source = SourceElementStore::new(&ModuleConfiguration::named("custom"));
    source.setup(vec![root("S1", "s")], vec![vec![1.0, 0.0]]).unwrap();

    let mut target = target_store("1");
    target
        .setup(vec![root("T1", "t1"), root("T2", "t2")], vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        .unwrap();

    let query = source.get_by_id("S1").unwrap();
    let hits = target.find_similar_with_distances(&query).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].0.identifier(), "T1");
    assert_eq!(hits[0].1, 1.0);
}

#[test]
fn mismatched_setup_leaves_store_empty() {
    let mut source = SourceElementStore::new(&ModuleConfiguration::named("custom"));
    let err = source
        .setup(vec![root("a", "x"), root("b", "y")], vec![vec![1.0]])
        .unwrap_err();
    assert!(matches!(
        err,
        RetrievalError::Validation(ValidationError::LengthMismatch { elements: 2, embeddings: 1 })
    ));
    assert!(source.get_all_elements(false).is_empty());
}

#[test]
fn get_by_id_returns_a_copy() {
    let mut source = SourceElementStore::new(&ModuleConfiguration::named("custom"));
    source.setup(vec![root("a", "x")], vec![vec![0.5, 0.5]]).unwrap();
    let mut copy = source.get_by_id("a").unwrap();
    copy.embedding[0] = 9.0;
    assert_eq!(source.get_by_id("a").unwrap().embedding, vec![0.5, 0.5]);
    assert!(source.get_by_id("missing").is_none());
}

#[test]
fn only_compare_filters_and_children_are_found_by_parent() {
    let parent = root("doc", "A. B.");
    let a = Arc::new(Element::from_parent(&parent, 0, "A.", true).unwrap());
    let b = Arc::new(Element::from_parent(&parent, 1, "B.", true).unwrap());
    let hidden = Arc::new(Element::new("other", "requirement", "z", 0, None, false).unwrap());

    let mut source = SourceElementStore::new(&ModuleConfiguration::named("custom"));
    source
        .setup(
            vec![Arc::clone(&parent), a, b, hidden],
            vec![vec![1.0], vec![1.0], vec![1.0], vec![1.0]],
        )
        .unwrap();

    let compared: Vec<String> = source
        .get_all_elements(true)
        .iter()
        .map(|e| e.element.identifier().to_string())
        .collect();
    assert_eq!(compared, vec!["doc", "doc$0", "doc$1"]);

    let children: Vec<String> = source
        .get_elements_by_parent_id("doc")
        .iter()
        .map(|e| e.element.identifier().to_string())
        .collect();
    assert_eq!(children, vec!["doc$0", "doc$1"]);
}

#[test]
fn reduce_keeps_first_roots_with_descendants() {
    let first = root("r1", "one");
    let second = root("r2", "two");
    let child = Arc::new(Element::from_parent(&first, 0, "one", true).unwrap());
    let mut target = target_store("infinity");
    target
        .setup(
            vec![Arc::clone(&first), Arc::clone(&second), child],
            vec![vec![1.0], vec![1.0], vec![1.0]],
        )
        .unwrap();

    let reduced = target.reduce(1).unwrap();
    let ids: Vec<String> = reduced.elements().iter().map(|e| e.identifier().to_string()).collect();
    assert_eq!(ids, vec!["r1", "r1$0"]);
}

#[test]
fn query_dimension_mismatch_is_an_error() {
    let mut target = target_store("3");
    target.setup(vec![root("T1", "t")], vec![vec![1.0, 0.0]]).unwrap();
    let query = ElementEmbedding::new(root("q", "q"), vec![1.0]);
    assert!(matches!(
        target.find_similar(&query),
        Err(RetrievalError::DimensionMismatch { .. })
    ));
}
