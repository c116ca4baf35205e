//! Per-itemset significance estimation.
//!
//! Each itemset walks `Pending → Sampling → Comparing →
//! {Significant, NotSignificant} → Done`, with `Failed` reachable from any
//! state. The observed per-occurrence scores are compared against a
//! resampled null distribution with the two-sample KS procedure; a
//! one-sided mean check keeps patterns that score worse than chance from
//! passing. Evaluations are independent across itemsets and run on the
//! shared worker pool.

use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rustc_hash::FxHasher;

use motif_core::config::SignificanceEstimatorConfig;
use motif_core::errors::SignificanceError;
use motif_core::traits::Cancellable;
use motif_core::types::{Distribution, Itemset, StructureCollection};

use crate::metrics::ExtractionMetric;

use super::ks;
use super::sampler::NullModelSampler;

/// States of one itemset's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationState {
    Pending,
    Sampling,
    Comparing,
    Significant,
    NotSignificant,
    Done,
    Failed,
}

/// Final verdict of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Significant,
    NotSignificant,
}

/// One itemset queued for evaluation with its observed score distribution.
#[derive(Debug, Clone)]
pub struct SignificanceTarget {
    pub itemset: Itemset,
    pub observed: Distribution,
}

/// Outcome of one itemset's evaluation.
#[derive(Debug)]
pub struct SignificanceRecord {
    pub itemset: Itemset,
    /// Terminal state: `Done`, `Failed`, or `Pending` when skipped on
    /// cancellation.
    pub state: EvaluationState,
    pub verdict: Option<Verdict>,
    /// Two-sample comparison statistic against the null distribution.
    pub statistic: f64,
    pub p_value: f64,
    pub error: Option<SignificanceError>,
}

impl SignificanceRecord {
    pub fn is_significant(&self) -> bool {
        self.verdict == Some(Verdict::Significant)
    }

    fn skipped(itemset: Itemset) -> Self {
        Self {
            itemset,
            state: EvaluationState::Pending,
            verdict: None,
            statistic: f64::NAN,
            p_value: f64::NAN,
            error: None,
        }
    }

    fn failed(itemset: Itemset, error: SignificanceError) -> Self {
        Self {
            itemset,
            state: EvaluationState::Failed,
            verdict: None,
            statistic: f64::NAN,
            p_value: f64::NAN,
            error: Some(error),
        }
    }
}

/// Resampling-based significance estimator.
pub struct SignificanceEstimator<'a> {
    collection: &'a StructureCollection,
    config: &'a SignificanceEstimatorConfig,
    metric: &'a dyn ExtractionMetric,
    sampler: NullModelSampler<'a>,
}

impl<'a> SignificanceEstimator<'a> {
    pub fn new(
        collection: &'a StructureCollection,
        config: &'a SignificanceEstimatorConfig,
        metric: &'a dyn ExtractionMetric,
    ) -> Self {
        Self {
            collection,
            config,
            metric,
            sampler: NullModelSampler::new(collection),
        }
    }

    /// Evaluate every target independently on the given pool.
    ///
    /// Cancellation is honored between evaluations: targets not yet
    /// started are returned in the `Pending` state, in-flight evaluations
    /// run to completion.
    pub fn estimate(
        &self,
        targets: Vec<SignificanceTarget>,
        pool: &rayon::ThreadPool,
        token: &dyn Cancellable,
    ) -> Vec<SignificanceRecord> {
        pool.install(|| {
            targets
                .into_par_iter()
                .map(|target| {
                    if token.is_cancelled() {
                        SignificanceRecord::skipped(target.itemset)
                    } else {
                        self.evaluate(target)
                    }
                })
                .collect()
        })
    }

    fn evaluate(&self, target: SignificanceTarget) -> SignificanceRecord {
        let identifier = target.itemset.identifier();
        let mut state = EvaluationState::Pending;

        transition(&identifier, &mut state, EvaluationState::Sampling);
        let null = match self.sample_null(&target) {
            Ok(null) => null,
            Err(error) => return SignificanceRecord::failed(target.itemset, error),
        };

        transition(&identifier, &mut state, EvaluationState::Comparing);
        let observed = target.observed.observations();
        if observed.is_empty() {
            return SignificanceRecord::failed(
                target.itemset,
                SignificanceError::NoObservedScores { identifier },
            );
        }
        let statistic = ks::ks_statistic(observed, null.observations());
        let p_value = ks::ks_p_value(statistic, observed.len(), null.len());

        let observed_mean = mean(observed);
        let null_mean = mean(null.observations());
        let significant = statistic >= self.config.ks_cutoff
            && p_value <= self.config.significance_cutoff
            && observed_mean <= null_mean;

        let verdict = if significant {
            transition(&identifier, &mut state, EvaluationState::Significant);
            Verdict::Significant
        } else {
            transition(&identifier, &mut state, EvaluationState::NotSignificant);
            Verdict::NotSignificant
        };
        transition(&identifier, &mut state, EvaluationState::Done);

        tracing::debug!(
            itemset = %identifier,
            statistic,
            p_value,
            significant,
            "significance evaluated"
        );

        SignificanceRecord {
            itemset: target.itemset,
            state,
            verdict: Some(verdict),
            statistic,
            p_value,
            error: None,
        }
    }

    /// Build the empirical null distribution for one target.
    fn sample_null(
        &self,
        target: &SignificanceTarget,
    ) -> Result<Distribution, SignificanceError> {
        let identifier = target.itemset.identifier();
        let mut rng = StdRng::seed_from_u64(sub_seed(self.config.seed, &identifier));
        let draws = self.sampler.sample(
            &identifier,
            target.itemset.size(),
            self.config.sample_size,
            &mut rng,
        )?;
        let evaluation = self.metric.evaluate(self.collection, &draws)?;
        if evaluation.occurrence_scores.len() < 2 {
            return Err(SignificanceError::InsufficientPopulation {
                identifier,
                size: target.itemset.size(),
                sampled: evaluation.occurrence_scores.len(),
                required: 2,
            });
        }
        Ok(Distribution::from_observations(evaluation.occurrence_scores))
    }
}

/// Per-itemset sub-seed: identical across runs and independent of worker
/// scheduling.
fn sub_seed(base: u64, identifier: &str) -> u64 {
    let mut hasher = FxHasher::default();
    identifier.hash(&mut hasher);
    base ^ hasher.finish()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn transition(identifier: &str, state: &mut EvaluationState, next: EvaluationState) {
    tracing::trace!(itemset = %identifier, ?state, ?next, "state transition");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::config::CohesionMetricConfig;
    use motif_core::traits::CancellationToken;
    use motif_core::types::{StructureGraph, StructureId};

    use crate::metrics::CohesionMetric;

    fn pool() -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap()
    }

    /// Structures with a tight pair far from a loose background spread.
    fn collection() -> StructureCollection {
        let structures = (0..12)
            .map(|i| {
                let mut graph = StructureGraph::new(StructureId::new(format!("s{i}")));
                graph.add_element("ALA", 1, [0.0, 0.0, 0.0]);
                graph.add_element("GLY", 2, [1.0, 0.0, 0.0]);
                graph.add_element("SER", 3, [40.0, 0.0, 0.0]);
                graph.add_element("TRP", 4, [0.0, 40.0, 0.0]);
                graph.add_element("LYS", 5, [40.0, 40.0, 0.0]);
                graph.add_element("HIS", 6, [0.0, 0.0, 40.0]);
                graph
            })
            .collect();
        StructureCollection::new(structures)
    }

    fn tight_target() -> SignificanceTarget {
        SignificanceTarget {
            itemset: Itemset::of(["ALA", "GLY"]).with_support(1.0),
            observed: Distribution::from_observations(vec![1.0; 12]),
        }
    }

    fn estimate(targets: Vec<SignificanceTarget>) -> Vec<SignificanceRecord> {
        let collection = collection();
        let config = SignificanceEstimatorConfig::default();
        let metric = CohesionMetric::new(CohesionMetricConfig::default());
        let estimator = SignificanceEstimator::new(&collection, &config, &metric);
        estimator.estimate(targets, &pool(), &CancellationToken::new())
    }

    #[test]
    fn tight_pattern_is_significant() {
        let records = estimate(vec![tight_target()]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, EvaluationState::Done);
        assert!(records[0].is_significant(), "p = {}", records[0].p_value);
    }

    #[test]
    fn chance_like_pattern_is_not_significant() {
        // Observed scores drawn from the same spread as the null model.
        let loose = SignificanceTarget {
            itemset: Itemset::of(["SER", "TRP"]).with_support(1.0),
            observed: Distribution::from_observations(vec![
                40.0, 56.6, 40.0, 56.6, 40.0, 56.6, 40.0, 56.6, 40.0, 56.6, 40.0, 56.6,
            ]),
        };
        let records = estimate(vec![loose]);
        assert!(!records[0].is_significant());
        assert_eq!(records[0].state, EvaluationState::Done);
    }

    #[test]
    fn verdicts_are_reproducible_for_equal_seeds() {
        let first = estimate(vec![tight_target()]);
        let second = estimate(vec![tight_target()]);
        assert_eq!(first[0].verdict, second[0].verdict);
        assert_eq!(first[0].statistic, second[0].statistic);
        assert_eq!(first[0].p_value, second[0].p_value);
    }

    #[test]
    fn oversized_pattern_fails_in_isolation() {
        let impossible = SignificanceTarget {
            itemset: Itemset::of(["A", "B", "C", "D", "E", "F", "G"]).with_support(1.0),
            observed: Distribution::from_observations(vec![1.0; 5]),
        };
        let records = estimate(vec![impossible, tight_target()]);
        assert_eq!(records[0].state, EvaluationState::Failed);
        assert!(records[0].error.is_some());
        // The healthy target still completes.
        assert_eq!(records[1].state, EvaluationState::Done);
    }

    #[test]
    fn cancelled_token_skips_pending_targets() {
        let collection = collection();
        let config = SignificanceEstimatorConfig::default();
        let metric = CohesionMetric::new(CohesionMetricConfig::default());
        let estimator = SignificanceEstimator::new(&collection, &config, &metric);
        let token = CancellationToken::new();
        token.cancel();
        let records = estimator.estimate(vec![tight_target()], &pool(), &token);
        assert_eq!(records[0].state, EvaluationState::Pending);
        assert!(records[0].verdict.is_none());
    }
}
