//! End-to-end orchestration: generation → extraction filtering →
//! significance estimation.
//!
//! The worker pool is resolved once from the configuration and threaded
//! through every parallel stage. Per-structure and per-itemset failures
//! are isolated onto the result carrier; only unhonorable configuration
//! and up-front cancellation abort a run.

use motif_core::config::PipelineConfig;
use motif_core::errors::{PipelineError, PipelineResult};
use motif_core::traits::Cancellable;
use motif_core::types::collections::FxHashMap;
use motif_core::types::{Distribution, Itemset, Occurrence, StructureCollection, StructureId};

use crate::association::presence_from_occurrences;
use crate::metrics::{metric_for, ExtractionMetric, MetricEvaluation};
use crate::mining::ItemsetMiner;
use crate::statistics::{SignificanceEstimator, SignificanceRecord, SignificanceTarget};

/// Everything one completed run produced. Non-fatal failures travel in
/// the surrounding [`PipelineResult`].
#[derive(Debug, Default)]
pub struct MiningOutcome {
    /// Accepted itemsets, sorted by canonical identifier.
    pub itemsets: Vec<Itemset>,
    /// Flattened occurrences per itemset.
    pub occurrences: FxHashMap<Itemset, Vec<Occurrence>>,
    /// Extraction-metric evaluation per itemset.
    pub evaluations: FxHashMap<Itemset, MetricEvaluation>,
    /// One significance record per itemset, in itemset order.
    pub records: Vec<SignificanceRecord>,
    /// Structures excluded after failing validation.
    pub excluded: Vec<StructureId>,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
    /// Number of structures in the mined collection.
    pub collection_len: usize,
}

impl MiningOutcome {
    /// Itemsets whose significance verdict is positive.
    pub fn significant_itemsets(&self) -> Vec<&Itemset> {
        self.records
            .iter()
            .filter(|record| record.is_significant())
            .map(|record| &record.itemset)
            .collect()
    }

    /// Per-structure presence vector of one itemset.
    pub fn presence(&self, itemset: &Itemset) -> Vec<bool> {
        let occurrences = self
            .occurrences
            .get(itemset)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        presence_from_occurrences(self.collection_len, occurrences)
    }
}

/// The discovery-and-validation pipeline.
pub struct MotifPipeline {
    config: PipelineConfig,
    metric: Box<dyn ExtractionMetric>,
    pool: rayon::ThreadPool,
}

impl MotifPipeline {
    /// Validate the configuration and resolve the worker pool.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::from)?;
        let workers = config.significance.resolved_parallelism();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|error| PipelineError::WorkerPool(error.to_string()))?;
        tracing::info!(workers, "pipeline initialized");
        let metric = metric_for(
            config.significance.significance_type,
            &config.cohesion,
            &config.adherence,
        );
        Ok(Self {
            config,
            metric,
            pool,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over a read-only structure collection.
    ///
    /// Isolated per-structure and per-itemset failures are accumulated on
    /// the returned carrier; only unhonorable configuration and up-front
    /// cancellation produce `Err`.
    pub fn run(
        &self,
        collection: &StructureCollection,
        token: &dyn Cancellable,
    ) -> Result<PipelineResult<MiningOutcome>, PipelineError> {
        if token.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let miner = ItemsetMiner::new(
            collection,
            &self.config.miner,
            self.metric.as_ref(),
            &self.pool,
        );
        let report = miner.mine(token)?;
        tracing::info!(
            itemsets = report.itemsets.len(),
            errors = report.errors.len(),
            "mining finished"
        );

        let records = if report.cancelled {
            Vec::new()
        } else {
            let targets: Vec<SignificanceTarget> = report
                .itemsets
                .iter()
                .filter_map(|itemset| {
                    let evaluation = report.evaluations.get(itemset)?;
                    Some(SignificanceTarget {
                        itemset: itemset.clone(),
                        observed: Distribution::from_observations(
                            evaluation.occurrence_scores.clone(),
                        ),
                    })
                })
                .collect();
            let estimator = SignificanceEstimator::new(
                collection,
                &self.config.significance,
                self.metric.as_ref(),
            );
            estimator.estimate(targets, &self.pool, token)
        };

        let significant = records.iter().filter(|r| r.is_significant()).count();
        tracing::info!(
            evaluated = records.len(),
            significant,
            "significance estimation finished"
        );

        let mut result = PipelineResult::new(MiningOutcome {
            itemsets: report.itemsets,
            occurrences: report.occurrences,
            evaluations: report.evaluations,
            records,
            excluded: report.excluded,
            cancelled: report.cancelled,
            collection_len: collection.len(),
        });
        result.errors = report.errors;
        Ok(result)
    }
}
