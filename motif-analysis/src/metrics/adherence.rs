//! Adherence: deviation of each occurrence from its pattern's consensus
//! geometry.
//!
//! Each occurrence is reduced to its sorted pairwise-distance descriptor,
//! which is invariant under rotation, translation, and member ordering.
//! The consensus is the element-wise mean descriptor across all
//! occurrences; an occurrence's score is the RMS deviation of its
//! descriptor from the consensus. The itemset aggregate is the mean score.

use statrs::statistics::{Data, Distribution as Descriptive};

use motif_core::config::AdherenceMetricConfig;
use motif_core::errors::MetricError;
use motif_core::types::{Occurrence, StructureCollection};

use super::{geometry, ExtractionMetric, MetricEvaluation, MetricKind};

pub struct AdherenceMetric {
    config: AdherenceMetricConfig,
}

impl AdherenceMetric {
    pub fn new(config: AdherenceMetricConfig) -> Self {
        Self { config }
    }

    /// Sorted pairwise-distance descriptor of one occurrence.
    fn descriptor(
        collection: &StructureCollection,
        occurrence: &Occurrence,
    ) -> Result<Vec<f64>, MetricError> {
        if occurrence.size() < 2 {
            return Err(MetricError::TooFewItems {
                required: 2,
                actual: occurrence.size(),
            });
        }
        let positions = geometry::positions(collection, occurrence)?;
        let mut distances = geometry::pairwise_distances(&positions);
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(distances)
    }

    /// Element-wise mean of equally sized descriptors.
    fn consensus(descriptors: &[Vec<f64>]) -> Vec<f64> {
        let length = descriptors[0].len();
        let mut consensus = vec![0.0; length];
        for descriptor in descriptors {
            for (slot, value) in consensus.iter_mut().zip(descriptor) {
                *slot += value;
            }
        }
        for slot in &mut consensus {
            *slot /= descriptors.len() as f64;
        }
        consensus
    }

    fn rms_deviation(descriptor: &[f64], consensus: &[f64]) -> f64 {
        let squared: f64 = descriptor
            .iter()
            .zip(consensus)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        (squared / descriptor.len() as f64).sqrt()
    }
}

impl ExtractionMetric for AdherenceMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Adherence
    }

    fn evaluate(
        &self,
        collection: &StructureCollection,
        occurrences: &[Occurrence],
    ) -> Result<MetricEvaluation, MetricError> {
        if occurrences.is_empty() {
            return Err(MetricError::NoObservations);
        }
        let descriptors = occurrences
            .iter()
            .map(|occurrence| Self::descriptor(collection, occurrence))
            .collect::<Result<Vec<Vec<f64>>, MetricError>>()?;
        let consensus = Self::consensus(&descriptors);

        let occurrence_scores: Vec<f64> = descriptors
            .iter()
            .map(|descriptor| Self::rms_deviation(descriptor, &consensus))
            .collect();

        let data = Data::new(occurrence_scores.clone());
        let aggregate = data.mean().unwrap_or(0.0);
        let variance = data.variance().unwrap_or(0.0);
        Ok(MetricEvaluation {
            occurrence_scores,
            aggregate,
            variance,
        })
    }

    fn accepts(&self, evaluation: &MetricEvaluation) -> bool {
        evaluation.aggregate <= self.config.maximal_adherence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::types::{StructureGraph, StructureId};

    /// Two structures carrying the same triangle, the second translated
    /// and relabeled in a different vertex order.
    fn congruent_collection() -> StructureCollection {
        let mut first = StructureGraph::new(StructureId::new("1abc_A"));
        first.add_element("ASP", 1, [0.0, 0.0, 0.0]);
        first.add_element("HIS", 2, [3.0, 0.0, 0.0]);
        first.add_element("SER", 3, [0.0, 4.0, 0.0]);

        let mut second = StructureGraph::new(StructureId::new("2xyz_B"));
        second.add_element("SER", 1, [10.0, 14.0, 5.0]);
        second.add_element("ASP", 2, [10.0, 10.0, 5.0]);
        second.add_element("HIS", 3, [13.0, 10.0, 5.0]);

        StructureCollection::new(vec![first, second])
    }

    fn all_vertices(collection: &StructureCollection, structure: usize) -> Occurrence {
        let vertices = collection
            .get(structure)
            .unwrap()
            .node_indices()
            .collect();
        Occurrence::new(structure, vertices)
    }

    #[test]
    fn congruent_occurrences_deviate_zero() {
        let collection = congruent_collection();
        let occurrences = vec![all_vertices(&collection, 0), all_vertices(&collection, 1)];
        let metric = AdherenceMetric::new(AdherenceMetricConfig::default());
        let evaluation = metric.evaluate(&collection, &occurrences).unwrap();
        assert!(evaluation.occurrence_scores.iter().all(|s| s.abs() < 1e-10));
        assert!(evaluation.aggregate.abs() < 1e-10);
        assert!(evaluation.variance.abs() < 1e-10);
    }

    #[test]
    fn distorted_occurrence_scores_positive() {
        let mut first = StructureGraph::new(StructureId::new("a"));
        first.add_element("ASP", 1, [0.0, 0.0, 0.0]);
        first.add_element("HIS", 2, [3.0, 0.0, 0.0]);
        let mut second = StructureGraph::new(StructureId::new("b"));
        second.add_element("ASP", 1, [0.0, 0.0, 0.0]);
        second.add_element("HIS", 2, [9.0, 0.0, 0.0]);
        let collection = StructureCollection::new(vec![first, second]);

        let occurrences = vec![all_vertices(&collection, 0), all_vertices(&collection, 1)];
        let metric = AdherenceMetric::new(AdherenceMetricConfig::default());
        let evaluation = metric.evaluate(&collection, &occurrences).unwrap();
        // Descriptors 3 and 9, consensus 6 — both deviate by 3.
        assert!(evaluation.occurrence_scores.iter().all(|s| (s - 3.0).abs() < 1e-10));
        assert!((evaluation.aggregate - 3.0).abs() < 1e-10);
    }

    #[test]
    fn single_item_occurrence_fails() {
        let collection = congruent_collection();
        let first = collection.get(0).unwrap().node_indices().next().unwrap();
        let occurrence = Occurrence::new(0, vec![first]);
        let metric = AdherenceMetric::new(AdherenceMetricConfig::default());
        assert!(metric
            .evaluate(&collection, std::slice::from_ref(&occurrence))
            .is_err());
    }
}
