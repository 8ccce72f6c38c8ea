//! Cascade of classifier groups with per-group majority voting.

use tracing::info;

use lissa_cache::CacheManager;
use lissa_core::config::ModuleConfiguration;
use lissa_core::errors::{ClassifierError, ConfigError, LissaError};
use lissa_core::models::ClassificationResult;

use super::{classify_each, create_pair_classifier, CandidatePair, PairClassifier};

/// Ordered stages; each stage only sees the candidates the previous one kept.
///
/// Within a stage of `n` classifiers a candidate survives with at least
/// `ceil(n / 2)` acceptances. Survivors of the last stage are reported with
/// confidence 1.0.
pub struct MultiStageClassifier {
    stages: Vec<Vec<Box<dyn PairClassifier>>>,
}

impl MultiStageClassifier {
    pub fn from_config(
        stages: &[Vec<ModuleConfiguration>],
        caches: &CacheManager,
    ) -> Result<Self, LissaError> {
        let stages = stages
            .iter()
            .map(|stage| {
                stage
                    .iter()
                    .map(|config| create_pair_classifier(config, caches))
                    .collect::<Result<Vec<_>, LissaError>>()
            })
            .collect::<Result<Vec<_>, LissaError>>()?;
        Ok(Self::new(stages)?)
    }

    /// Fails on an empty cascade or an empty stage; either would accept every candidate.
    pub fn new(stages: Vec<Vec<Box<dyn PairClassifier>>>) -> Result<Self, ConfigError> {
        if stages.is_empty() || stages.iter().any(Vec::is_empty) {
            return Err(ConfigError::ValidationFailed {
                field: "classifiers".to_string(),
                message: "every stage must contain at least one classifier".to_string(),
            });
        }
        Ok(Self { stages })
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn classify(&self, pairs: &[CandidatePair]) -> Result<Vec<ClassificationResult>, ClassifierError> {
        let mut remaining: Vec<CandidatePair> = pairs.to_vec();
        for (index, stage) in self.stages.iter().enumerate() {
            info!(
                stage = index,
                classifiers = stage.len(),
                tasks = remaining.len(),
                "running classification stage"
            );
            let before = remaining.len();
            remaining = Self::vote(stage, remaining)?;
            info!(stage = index, before, after = remaining.len(), "stage finished");
            if remaining.is_empty() {
                info!(stage = index, "no candidates left, stopping");
                break;
            }
        }
        Ok(remaining
            .into_iter()
            .map(|(source, target)| ClassificationResult::accepted(source, target))
            .collect())
    }

    fn vote(
        stage: &[Box<dyn PairClassifier>],
        pairs: Vec<CandidatePair>,
    ) -> Result<Vec<CandidatePair>, ClassifierError> {
        let mut votes = vec![0usize; pairs.len()];
        for classifier in stage {
            let decisions = classify_each(classifier.as_ref(), &pairs)?;
            for (count, decision) in votes.iter_mut().zip(decisions) {
                if decision.is_some() {
                    *count += 1;
                }
            }
        }
        let threshold = stage.len().div_ceil(2);
        Ok(pairs
            .into_iter()
            .zip(votes)
            .filter(|(_, count)| *count >= threshold)
            .map(|(pair, _)| pair)
            .collect())
    }
}
