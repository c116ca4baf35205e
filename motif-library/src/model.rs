//! The persisted library model.

use serde::{Deserialize, Serialize};

use motif_core::config::LibraryConfig;
use motif_core::errors::LibraryError;
use motif_core::types::{Itemset, Occurrence, StructureCollection};

use motif_analysis::pipeline::MiningOutcome;

use crate::cluster::cluster_validated;

/// One significant itemset carried into library assembly, with everything
/// clustering and representative selection need.
#[derive(Debug, Clone)]
pub struct ValidatedItemset {
    pub itemset: Itemset,
    /// p-value of the significance verdict.
    pub p_value: f64,
    /// Extraction-metric aggregate (lower is tighter).
    pub aggregate_score: f64,
    /// Per-occurrence metric scores, parallel to `occurrences`.
    pub occurrence_scores: Vec<f64>,
    pub occurrences: Vec<Occurrence>,
    /// Per-structure presence vector.
    pub presence: Vec<bool>,
}

impl ValidatedItemset {
    /// Extract the significant itemsets of a completed run.
    pub fn from_outcome(outcome: &MiningOutcome) -> Vec<ValidatedItemset> {
        outcome
            .records
            .iter()
            .filter(|record| record.is_significant())
            .filter_map(|record| {
                let itemset = &record.itemset;
                let evaluation = outcome.evaluations.get(itemset)?;
                let occurrences = outcome.occurrences.get(itemset)?;
                Some(ValidatedItemset {
                    itemset: itemset.clone(),
                    p_value: record.p_value,
                    aggregate_score: evaluation.aggregate,
                    occurrence_scores: evaluation.occurrence_scores.clone(),
                    occurrences: occurrences.clone(),
                    presence: outcome.presence(itemset),
                })
            })
            .collect()
    }
}

/// The persisted unit: one representative occurrence of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemsetLibraryEntry {
    pub identifier: String,
    pub labels: Vec<String>,
    #[serde(rename = "pdb-lines")]
    pub pdb_lines: String,
    pub size: usize,
}

impl ItemsetLibraryEntry {
    pub fn new(itemset: &Itemset, pdb_lines: String) -> Self {
        Self {
            identifier: itemset.identifier(),
            labels: itemset.labels().to_vec(),
            pdb_lines,
            size: itemset.size(),
        }
    }

    /// Internal consistency of one entry; violated by corrupt archives.
    pub(crate) fn validate(&self) -> Result<(), LibraryError> {
        if self.labels.is_empty() || self.size != self.labels.len() {
            return Err(LibraryError::CorruptArchive {
                reason: format!(
                    "entry {} declares size {} but carries {} label(s)",
                    self.identifier,
                    self.size,
                    self.labels.len()
                ),
            });
        }
        let mut sorted = self.labels.clone();
        sorted.sort();
        if self.identifier != sorted.join("-") {
            return Err(LibraryError::CorruptArchive {
                reason: format!("entry identifier {} does not match its labels", self.identifier),
            });
        }
        Ok(())
    }
}

/// Ordered collection of representative motifs plus the clustering
/// parameters it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsetLibrary {
    entries: Vec<ItemsetLibraryEntry>,
    minimal_cluster_size: usize,
    maximal_entries: usize,
}

impl ItemsetLibrary {
    pub(crate) fn from_parts(
        entries: Vec<ItemsetLibraryEntry>,
        minimal_cluster_size: usize,
        maximal_entries: usize,
    ) -> Self {
        Self {
            entries,
            minimal_cluster_size,
            maximal_entries,
        }
    }

    /// Cluster the validated itemsets and assemble the capped,
    /// deterministic entry list.
    ///
    /// Each cluster contributes its representative itemset's best-scoring
    /// occurrence, rendered to fragment text by the owning structure.
    pub fn build(
        validated: &[ValidatedItemset],
        collection: &StructureCollection,
        config: &LibraryConfig,
    ) -> Result<Self, LibraryError> {
        config.validate()?;
        let clusters = cluster_validated(validated, config)?;

        let mut entries = Vec::new();
        for cluster in clusters.iter().take(config.maximal_entries) {
            let representative = &validated[cluster.representative];
            let occurrence = best_occurrence(representative)?;
            let structure = collection.get(occurrence.structure).ok_or_else(|| {
                LibraryError::MissingRepresentative {
                    identifier: representative.itemset.identifier(),
                }
            })?;
            let pdb_lines = structure.render_fragment(&occurrence.vertices);
            tracing::debug!(
                itemset = %representative.itemset.identifier(),
                cluster_size = cluster.members.len(),
                "library entry assembled"
            );
            entries.push(ItemsetLibraryEntry::new(&representative.itemset, pdb_lines));
        }

        tracing::info!(entries = entries.len(), "library built");
        Ok(Self::from_parts(
            entries,
            config.minimal_cluster_size,
            config.maximal_entries,
        ))
    }

    pub fn entries(&self) -> &[ItemsetLibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn minimal_cluster_size(&self) -> usize {
        self.minimal_cluster_size
    }

    pub fn maximal_entries(&self) -> usize {
        self.maximal_entries
    }
}

/// The occurrence with the lowest metric score represents its itemset.
fn best_occurrence(validated: &ValidatedItemset) -> Result<&Occurrence, LibraryError> {
    let mut best: Option<(f64, &Occurrence)> = None;
    for (index, occurrence) in validated.occurrences.iter().enumerate() {
        let score = validated
            .occurrence_scores
            .get(index)
            .copied()
            .unwrap_or(f64::INFINITY);
        let replace = match best {
            Some((best_score, _)) => score < best_score,
            None => true,
        };
        if replace {
            best = Some((score, occurrence));
        }
    }
    best.map(|(_, occurrence)| occurrence)
        .ok_or_else(|| LibraryError::MissingRepresentative {
            identifier: validated.itemset.identifier(),
        })
}
