//! Level-wise itemset mining across the structure collection.
//!
//! Each level grows candidates one vertex at a time, counts support,
//! prunes below the support threshold, and applies the configured
//! extraction metric before the next level. Rejected label sets poison
//! their supersets: a later candidate containing a rejected set is never
//! grown.

use std::collections::BTreeMap;

use rayon::prelude::*;

use motif_core::config::MinerConfig;
use motif_core::errors::{GenerationError, PipelineError};
use motif_core::traits::Cancellable;
use motif_core::types::collections::{FxHashMap, FxHashSet};
use motif_core::types::{Itemset, Occurrence, StructureCollection, StructureId};

use crate::metrics::{ExtractionMetric, MetricEvaluation};

use super::generator::CandidateGenerator;

/// Occurrences of one itemset, grouped by structure index.
type StructureOccurrences = BTreeMap<usize, Vec<Occurrence>>;

/// All candidates of one level, in canonical itemset order.
type Level = BTreeMap<Itemset, StructureOccurrences>;

/// What one mining run produced.
#[derive(Debug, Default)]
pub struct MiningReport {
    /// Accepted itemsets with support attached, sorted by identifier.
    pub itemsets: Vec<Itemset>,
    /// Flattened occurrences per accepted itemset.
    pub occurrences: FxHashMap<Itemset, Vec<Occurrence>>,
    /// Extraction-metric evaluation per accepted itemset.
    pub evaluations: FxHashMap<Itemset, MetricEvaluation>,
    /// Structures excluded after failing validation.
    pub excluded: Vec<StructureId>,
    /// Isolated, non-fatal failures collected along the way.
    pub errors: Vec<PipelineError>,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
}

/// Level-wise miner over the read-only structure collection.
pub struct ItemsetMiner<'a> {
    collection: &'a StructureCollection,
    config: &'a MinerConfig,
    metric: &'a dyn ExtractionMetric,
    pool: &'a rayon::ThreadPool,
}

impl<'a> ItemsetMiner<'a> {
    pub fn new(
        collection: &'a StructureCollection,
        config: &'a MinerConfig,
        metric: &'a dyn ExtractionMetric,
        pool: &'a rayon::ThreadPool,
    ) -> Self {
        Self {
            collection,
            config,
            metric,
            pool,
        }
    }

    pub fn mine(&self, token: &dyn Cancellable) -> Result<MiningReport, PipelineError> {
        if self.collection.is_empty() {
            return Err(GenerationError::EmptyCollection.into());
        }

        let mut report = MiningReport::default();
        let included = self.validate_structures(&mut report)?;

        tracing::info!(
            structures = included.len(),
            excluded = report.excluded.len(),
            "mining initialized"
        );

        let mut level = self.seed_level(&included);
        let mut size = 2usize;
        let mut rejected: Vec<Itemset> = Vec::new();

        loop {
            if token.is_cancelled() {
                tracing::info!(size, "mining cancelled between levels");
                report.cancelled = true;
                break;
            }

            let survivors = self.evaluate_level(level, included.len(), size, &mut rejected, &mut report);
            tracing::info!(size, survivors = survivors.len(), "level evaluated");

            if survivors.is_empty() || size >= self.config.maximal_itemset_size {
                break;
            }

            level = self.extend_level(&survivors, &included, &rejected);
            if level.is_empty() {
                break;
            }
            size += 1;
        }

        report.itemsets.sort_by_key(|itemset| itemset.identifier());
        Ok(report)
    }

    /// Validate every structure once; malformed structures are excluded
    /// from all levels but do not abort the run.
    fn validate_structures(
        &self,
        report: &mut MiningReport,
    ) -> Result<Vec<usize>, PipelineError> {
        let mut included = Vec::with_capacity(self.collection.len());
        for (index, structure) in self.collection.enumerate() {
            match structure.validate() {
                Ok(()) => included.push(index),
                Err(error) => {
                    tracing::warn!(structure = %structure.id(), %error, "structure excluded");
                    report.excluded.push(structure.id().clone());
                    report.errors.push(error.into());
                }
            }
        }
        if included.is_empty() {
            return Err(GenerationError::EmptyCollection.into());
        }
        Ok(included)
    }

    /// Size-2 candidates from every contact edge, merged deterministically.
    fn seed_level(&self, included: &[usize]) -> Level {
        let per_structure: Vec<(usize, FxHashMap<Itemset, Vec<Occurrence>>)> =
            self.pool.install(|| {
                included
                    .par_iter()
                    .filter_map(|&index| {
                        let structure = self.collection.get(index)?;
                        let generator = CandidateGenerator::new(index, structure);
                        Some((index, generator.seed()))
                    })
                    .collect()
            });
        self.merge_levels(per_structure)
    }

    /// Grow the survivors of one level by one vertex, per structure in
    /// parallel, then merge and prune poisoned supersets.
    fn extend_level(
        &self,
        survivors: &Level,
        included: &[usize],
        rejected: &[Itemset],
    ) -> Level {
        let per_structure: Vec<(usize, FxHashMap<Itemset, Vec<Occurrence>>)> =
            self.pool.install(|| {
                included
                    .par_iter()
                    .filter_map(|&index| {
                        let structure = self.collection.get(index)?;
                        let generator = CandidateGenerator::new(index, structure);
                        let mut seen = FxHashSet::default();
                        let mut local: FxHashMap<Itemset, Vec<Occurrence>> = FxHashMap::default();
                        for occurrences in survivors.values() {
                            let Some(parents) = occurrences.get(&index) else {
                                continue;
                            };
                            for (itemset, grown) in generator.extend(parents, &mut seen) {
                                local.entry(itemset).or_default().extend(grown);
                            }
                        }
                        Some((index, local))
                    })
                    .collect()
            });

        let mut merged = self.merge_levels(per_structure);
        merged.retain(|candidate, _| {
            !rejected
                .iter()
                .any(|poison| candidate.contains_labels(poison))
        });
        merged
    }

    /// Merge per-structure candidate maps into canonical level order and
    /// cap stored embeddings per structure.
    fn merge_levels(
        &self,
        per_structure: Vec<(usize, FxHashMap<Itemset, Vec<Occurrence>>)>,
    ) -> Level {
        let mut level = Level::new();
        for (index, candidates) in per_structure {
            for (itemset, mut occurrences) in candidates {
                occurrences.truncate(self.config.max_occurrences_per_structure);
                level
                    .entry(itemset)
                    .or_default()
                    .insert(index, occurrences);
            }
        }
        level
    }

    /// Apply support and extraction-metric filters to one level; accepted
    /// itemsets of reportable size land in the report, everything else
    /// joins the rejected set.
    fn evaluate_level(
        &self,
        level: Level,
        structure_count: usize,
        size: usize,
        rejected: &mut Vec<Itemset>,
        report: &mut MiningReport,
    ) -> Level {
        let mut survivors = Level::new();
        for (itemset, tables) in level {
            let support = tables.len() as f64 / structure_count as f64;
            if support < self.config.minimal_support {
                tracing::debug!(candidate = %itemset.identifier(), support, "below minimal support");
                rejected.push(itemset);
                continue;
            }

            let flattened: Vec<Occurrence> = tables.values().flatten().cloned().collect();
            let evaluation = match self.metric.evaluate(self.collection, &flattened) {
                Ok(evaluation) => evaluation,
                Err(error) => {
                    tracing::debug!(candidate = %itemset.identifier(), %error, "metric evaluation failed");
                    report.errors.push(error.into());
                    rejected.push(itemset);
                    continue;
                }
            };
            if !self.metric.accepts(&evaluation) {
                tracing::debug!(
                    candidate = %itemset.identifier(),
                    aggregate = evaluation.aggregate,
                    "rejected by extraction metric"
                );
                rejected.push(itemset);
                continue;
            }

            let accepted = itemset.clone().with_support(support);
            if size >= self.config.minimal_itemset_size {
                report.occurrences.insert(accepted.clone(), flattened);
                report.evaluations.insert(accepted.clone(), evaluation);
                report.itemsets.push(accepted);
            }
            survivors.insert(itemset, tables);
        }
        survivors
    }
}
