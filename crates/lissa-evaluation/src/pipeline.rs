//! One end-to-end trace-link recovery run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, info_span};

use lissa_aggregator::ResultAggregator;
use lissa_cache::CacheManager;
use lissa_classifier::Classifier;
use lissa_core::config::LissaConfig;
use lissa_core::context::ContextStore;
use lissa_core::errors::{EvaluationError, LissaError};
use lissa_core::knowledge::{Element, TraceLink};
use lissa_embeddings::CachedEmbeddingCreator;
use lissa_retrieval::{SourceElementStore, TargetElementStore};

use crate::gold_standard;
use crate::statistics::{save_trace_links, Statistics};

const DEFAULT_RUN_NAME: &str = "evaluation";

/// What a run produced.
#[derive(Debug, Clone)]
pub struct EvaluationOutcome {
    pub identifier: String,
    pub links: BTreeSet<TraceLink>,
    pub trace_links_path: PathBuf,
    /// Present when a gold standard is configured.
    pub statistics: Option<Statistics>,
    pub results_path: Option<PathBuf>,
}

/// Every module of a run, built up front from one [`LissaConfig`].
///
/// Construction fails fast on any configuration problem, including missing
/// credentials and an unreadable gold standard. [`Evaluation::run`] then goes
/// embeddings → stores → classification → aggregation → statistics, and
/// flushes the caches at the end whether or not the run succeeded.
pub struct Evaluation {
    config: LissaConfig,
    run_name: String,
    output_dir: PathBuf,
    caches: CacheManager,
    embedding_creator: CachedEmbeddingCreator,
    source_store: SourceElementStore,
    target_store: TargetElementStore,
    classifier: Classifier,
    aggregator: ResultAggregator,
    gold_standard: Option<BTreeSet<TraceLink>>,
    source_limit: Option<usize>,
    target_limit: Option<usize>,
}

impl Evaluation {
    pub fn new(
        config: LissaConfig,
        context: &ContextStore,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, LissaError> {
        config.validate()?;
        let caches = CacheManager::from_config(&config)?;
        let embedding_creator = CachedEmbeddingCreator::from_config(&config.embedding_creator, &caches)?;
        let source_store = SourceElementStore::new(&config.source_store);
        let target_store = TargetElementStore::new(&config.target_store, context)?;
        let classifier = Classifier::from_config(&config, &caches)?;
        let aggregator = ResultAggregator::from_config(&config.result_aggregator)?;
        let gold_standard = match &config.gold_standard_configuration {
            Some(gs) => gold_standard::load_configured(gs)?,
            None => None,
        };
        Ok(Self {
            config,
            run_name: DEFAULT_RUN_NAME.to_string(),
            output_dir: output_dir.into(),
            caches,
            embedding_creator,
            source_store,
            target_store,
            classifier,
            aggregator,
            gold_standard,
            source_limit: None,
            target_limit: None,
        })
    }

    /// Prefix of the run identifier used in output file names.
    pub fn with_run_name(mut self, name: impl Into<String>) -> Self {
        self.run_name = name.into();
        self
    }

    /// Keep only the first `roots` source artifacts (and their elements).
    pub fn with_source_limit(mut self, roots: usize) -> Self {
        self.source_limit = Some(roots);
        self
    }

    /// Keep only the first `roots` target artifacts (and their elements).
    pub fn with_target_limit(mut self, roots: usize) -> Self {
        self.target_limit = Some(roots);
        self
    }

    pub fn identifier(&self) -> String {
        self.config.identifier_for(&self.run_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run once over the given elements. A second call fails because the stores are already set up.
    pub fn run(
        &mut self,
        source_elements: Vec<Arc<Element>>,
        target_elements: Vec<Arc<Element>>,
    ) -> Result<EvaluationOutcome, LissaError> {
        let identifier = self.identifier();
        let _span = info_span!("evaluation", id = %identifier).entered();
        let outcome = self.execute(&identifier, source_elements, target_elements);
        let flushed = self.caches.flush();
        let outcome = outcome?;
        flushed?;
        Ok(outcome)
    }

    fn execute(
        &mut self,
        identifier: &str,
        source_elements: Vec<Arc<Element>>,
        target_elements: Vec<Arc<Element>>,
    ) -> Result<EvaluationOutcome, LissaError> {
        let source_artifacts = count_roots(&source_elements);
        let target_artifacts = count_roots(&target_elements);

        info!(elements = source_elements.len(), "embedding source elements");
        let source_embeddings = self.embedding_creator.calculate_embeddings(&source_elements)?;
        info!(elements = target_elements.len(), "embedding target elements");
        let target_embeddings = self.embedding_creator.calculate_embeddings(&target_elements)?;

        self.source_store.setup(source_elements, source_embeddings)?;
        self.target_store.setup(target_elements, target_embeddings)?;
        if let Some(roots) = self.source_limit {
            self.source_store = self.source_store.reduce(roots)?;
        }
        if let Some(roots) = self.target_limit {
            self.target_store = self.target_store.reduce(roots)?;
        }

        let results = self.classifier.classify(&self.source_store, &self.target_store)?;
        let links = self.aggregator.aggregate(&results);
        info!(results = results.len(), links = links.len(), "aggregated trace links");

        std::fs::create_dir_all(&self.output_dir).map_err(|source| EvaluationError::Io {
            path: self.output_dir.display().to_string(),
            source,
        })?;
        let (statistics, results_path) = match &self.gold_standard {
            Some(gold) => {
                let statistics = Statistics::calculate(&links, gold);
                info!(
                    precision = statistics.precision(),
                    recall = statistics.recall(),
                    f1 = statistics.f1(),
                    "evaluated against gold standard"
                );
                let summary = self.config.effective_summary()?;
                let path = statistics.write_results(
                    &self.output_dir,
                    identifier,
                    &summary,
                    source_artifacts,
                    target_artifacts,
                )?;
                (Some(statistics), Some(path))
            }
            None => (None, None),
        };

        let trace_links_path = save_trace_links(&links, &self.output_dir, identifier)?;

        Ok(EvaluationOutcome {
            identifier: identifier.to_string(),
            links,
            trace_links_path,
            statistics,
            results_path,
        })
    }
}

fn count_roots(elements: &[Arc<Element>]) -> usize {
    elements.iter().filter(|e| e.parent_id().is_none()).count()
}
