//! Two-step retrieval: find the best-matching component, then return the
//! elements registered for it in the element-retrieval side table.

use std::sync::Arc;

use tracing::{debug, info};

use lissa_core::config::{defaults, ModuleConfiguration};
use lissa_core::context::{ContextStore, ElementRetrieval};
use lissa_core::errors::{ConfigError, RetrievalError};

use super::RetrievalStrategy;
use crate::entry::{ElementEmbedding, ScoredElement};

const INNER_NAME_KEY: &str = "name";

#[derive(Debug, Clone)]
pub struct CodeGraphStrategy {
    inner: Box<RetrievalStrategy>,
    retrieval: Arc<ElementRetrieval>,
}

impl CodeGraphStrategy {
    /// Fails unless an [`ElementRetrieval`] context was registered.
    ///
    /// The inner strategy is named by the `name` argument; all other
    /// arguments are forwarded to it.
    pub fn from_config(config: &ModuleConfiguration, context: &ContextStore) -> Result<Self, ConfigError> {
        let retrieval = context.require_context::<ElementRetrieval>(ElementRetrieval::IDENTIFIER)?;
        let inner_name =
            config.argument_as_string_or(INNER_NAME_KEY, defaults::DEFAULT_CODE_GRAPH_INNER_STRATEGY)?;
        let mut inner_config = ModuleConfiguration::named(inner_name);
        let forwarded: Vec<String> = config
            .argument_keys()
            .filter(|key| *key != INNER_NAME_KEY)
            .map(str::to_string)
            .collect();
        for key in forwarded {
            let value = config.argument_as_string(&key)?;
            inner_config = inner_config.with_arg(key, value);
        }
        let inner = RetrievalStrategy::from_config(&inner_config, context)?;
        info!(inner = inner.name(), components = retrieval.len(), "code graph strategy ready");
        Ok(Self::new(inner, retrieval))
    }

    pub fn new(inner: RetrievalStrategy, retrieval: Arc<ElementRetrieval>) -> Self {
        Self {
            inner: Box::new(inner),
            retrieval,
        }
    }

    pub fn inner(&self) -> &RetrievalStrategy {
        &self.inner
    }

    pub(crate) fn find(
        &self,
        query: &ElementEmbedding,
        components: &[ElementEmbedding],
    ) -> Result<Vec<ScoredElement>, RetrievalError> {
        let ranked = self.inner.find_similar_elements(query, components)?;
        let Some((component, score)) = ranked.into_iter().next() else {
            return Ok(Vec::new());
        };
        debug!(
            query = query.element.identifier(),
            component = component.identifier(),
            score,
            "best component"
        );
        Ok(self
            .retrieval
            .retrieve(&component)
            .map(|elements| elements.iter().map(|e| (Arc::clone(e), score)).collect())
            .unwrap_or_default())
    }
}
