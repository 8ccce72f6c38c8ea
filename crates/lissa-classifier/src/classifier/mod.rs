//! Classifiers and the executor that runs them over candidate pairs.

pub mod mock;
pub mod multi_stage;
pub mod reasoning;
pub mod simple;

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use lissa_cache::CacheManager;
use lissa_core::config::{ClassifierSelection, LissaConfig, ModuleConfiguration};
use lissa_core::constants::MODULE_NAME_SEPARATOR;
use lissa_core::errors::{ClassifierError, ConfigError, LissaError, RetrievalError};
use lissa_core::knowledge::Element;
use lissa_core::models::ClassificationResult;
use lissa_retrieval::{SourceElementStore, TargetElementStore};

pub use mock::MockClassifier;
pub use multi_stage::MultiStageClassifier;
pub use reasoning::ReasoningClassifier;
pub use simple::SimpleClassifier;

/// A (source, target) candidate awaiting classification.
pub type CandidatePair = (Arc<Element>, Arc<Element>);

/// Decides single candidate pairs.
///
/// `Ok(None)` rejects the pair. Implementations are shared across worker
/// threads, so any per-call state lives behind the cache.
pub trait PairClassifier: Send + Sync {
    fn name(&self) -> &str;

    /// Worker count for [`classify_each`]; `<= 1` runs sequentially.
    fn threads(&self) -> usize;

    fn classify_pair(
        &self,
        source: &Arc<Element>,
        target: &Arc<Element>,
    ) -> Result<Option<ClassificationResult>, ClassifierError>;
}

/// Single classifier selected by the first `_`-separated token of `config.name()`.
pub fn create_pair_classifier(
    config: &ModuleConfiguration,
    caches: &CacheManager,
) -> Result<Box<dyn PairClassifier>, LissaError> {
    let kind = config
        .name()
        .split(MODULE_NAME_SEPARATOR)
        .next()
        .unwrap_or_default();
    let classifier: Box<dyn PairClassifier> = match kind {
        mock::MOCK_CLASSIFIER => Box::new(MockClassifier::new()),
        simple::SIMPLE_CLASSIFIER => Box::new(SimpleClassifier::from_config(config, caches)?),
        reasoning::REASONING_CLASSIFIER => Box::new(ReasoningClassifier::from_config(config, caches)?),
        _ => {
            return Err(ConfigError::UnknownModule {
                kind: "classifier".to_string(),
                name: config.name().to_string(),
            }
            .into())
        }
    };
    info!(classifier = config.name(), threads = classifier.threads(), "classifier ready");
    Ok(classifier)
}

/// Decision for every pair, in input order.
pub fn classify_each(
    classifier: &dyn PairClassifier,
    pairs: &[CandidatePair],
) -> Result<Vec<Option<ClassificationResult>>, ClassifierError> {
    let classify = |(source, target): &CandidatePair| -> Result<Option<ClassificationResult>, ClassifierError> {
        let result = classifier.classify_pair(source, target)?;
        debug!(
            source = source.identifier(),
            target = target.identifier(),
            accepted = result.is_some(),
            "classified"
        );
        Ok(result)
    };

    let threads = classifier.threads().min(pairs.len());
    if threads <= 1 {
        return pairs.iter().map(classify).collect();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ClassifierError::WorkerPool {
            threads,
            reason: e.to_string(),
        })?;
    pool.install(|| pairs.par_iter().map(classify).collect())
}

/// Accepted results only, in input order.
pub fn classify_pairs(
    classifier: &dyn PairClassifier,
    pairs: &[CandidatePair],
) -> Result<Vec<ClassificationResult>, ClassifierError> {
    let results: Vec<ClassificationResult> = classify_each(classifier, pairs)?
        .into_iter()
        .flatten()
        .collect();
    info!(
        classifier = classifier.name(),
        tasks = pairs.len(),
        accepted = results.len(),
        "classification finished"
    );
    Ok(results)
}

/// Every comparable source element paired with each target it retrieves.
pub fn create_classification_tasks(
    source: &SourceElementStore,
    target: &TargetElementStore,
) -> Result<Vec<CandidatePair>, RetrievalError> {
    let mut pairs = Vec::new();
    for query in source.get_all_elements(true) {
        for candidate in target.find_similar(&query)? {
            pairs.push((Arc::clone(&query.element), candidate));
        }
    }
    Ok(pairs)
}

/// The configured classification: one classifier or a cascade of voting stages.
pub enum Classifier {
    Single(Box<dyn PairClassifier>),
    MultiStage(MultiStageClassifier),
}

impl Classifier {
    /// Built from whichever of `classifier` / `classifiers` is set; fails if both or neither are.
    pub fn from_config(config: &LissaConfig, caches: &CacheManager) -> Result<Self, LissaError> {
        match config.classifier_selection()? {
            ClassifierSelection::Single(module) => {
                Ok(Self::Single(create_pair_classifier(module, caches)?))
            }
            ClassifierSelection::MultiStage(stages) => {
                Ok(Self::MultiStage(MultiStageClassifier::from_config(stages, caches)?))
            }
        }
    }

    /// Classify every candidate the target store retrieves for the source store.
    pub fn classify(
        &self,
        source: &SourceElementStore,
        target: &TargetElementStore,
    ) -> Result<Vec<ClassificationResult>, ClassifierError> {
        let pairs = create_classification_tasks(source, target)?;
        info!(tasks = pairs.len(), "classification tasks created");
        self.classify_candidates(&pairs)
    }

    pub fn classify_candidates(
        &self,
        pairs: &[CandidatePair],
    ) -> Result<Vec<ClassificationResult>, ClassifierError> {
        match self {
            Self::Single(classifier) => classify_pairs(classifier.as_ref(), pairs),
            Self::MultiStage(stages) => stages.classify(pairs),
        }
    }
}

/// Replace `{source_type}`, `{source_content}`, `{target_type}`, `{target_content}`.
pub(crate) fn fill_template(template: &str, source: &Element, target: &Element) -> String {
    template
        .replace("{source_type}", source.knowledge_type())
        .replace("{source_content}", source.content())
        .replace("{target_type}", target.knowledge_type())
        .replace("{target_content}", target.content())
}
