//! Cohesion: spatial compactness of itemset occurrences.
//!
//! Per-occurrence score: mean pairwise distance among member positions.
//! Itemset aggregate: median across occurrences, which resists the odd
//! stretched embedding better than the mean.

use statrs::statistics::{Data, Distribution as Descriptive, Median};

use motif_core::config::CohesionMetricConfig;
use motif_core::errors::MetricError;
use motif_core::types::{Occurrence, StructureCollection};

use super::{geometry, ExtractionMetric, MetricEvaluation, MetricKind};

pub struct CohesionMetric {
    config: CohesionMetricConfig,
}

impl CohesionMetric {
    pub fn new(config: CohesionMetricConfig) -> Self {
        Self { config }
    }

    /// Score one occurrence: mean pairwise distance of its members.
    ///
    /// Cohesion is undefined below two items.
    pub fn score_occurrence(
        collection: &StructureCollection,
        occurrence: &Occurrence,
    ) -> Result<f64, MetricError> {
        if occurrence.size() < 2 {
            return Err(MetricError::TooFewItems {
                required: 2,
                actual: occurrence.size(),
            });
        }
        let positions = geometry::positions(collection, occurrence)?;
        let distances = geometry::pairwise_distances(&positions);
        Ok(geometry::mean(&distances))
    }
}

impl ExtractionMetric for CohesionMetric {
    fn kind(&self) -> MetricKind {
        MetricKind::Cohesion
    }

    fn evaluate(
        &self,
        collection: &StructureCollection,
        occurrences: &[Occurrence],
    ) -> Result<MetricEvaluation, MetricError> {
        if occurrences.is_empty() {
            return Err(MetricError::NoObservations);
        }
        let occurrence_scores = occurrences
            .iter()
            .map(|occurrence| Self::score_occurrence(collection, occurrence))
            .collect::<Result<Vec<f64>, MetricError>>()?;

        let data = Data::new(occurrence_scores.clone());
        let aggregate = data.median();
        let variance = data.variance().unwrap_or(0.0);
        Ok(MetricEvaluation {
            occurrence_scores,
            aggregate,
            variance,
        })
    }

    fn accepts(&self, evaluation: &MetricEvaluation) -> bool {
        evaluation.aggregate <= self.config.maximal_cohesion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::types::{StructureGraph, StructureId};

    fn collection_with_triangle() -> StructureCollection {
        let mut graph = StructureGraph::new(StructureId::new("1abc_A"));
        graph.add_element("ASP", 1, [0.0, 0.0, 0.0]);
        graph.add_element("HIS", 2, [3.0, 0.0, 0.0]);
        graph.add_element("SER", 3, [0.0, 4.0, 0.0]);
        StructureCollection::new(vec![graph])
    }

    #[test]
    fn mean_pairwise_distance_of_triangle() {
        let collection = collection_with_triangle();
        let vertices = collection.get(0).unwrap().node_indices().collect();
        let occurrence = Occurrence::new(0, vertices);
        let score = CohesionMetric::score_occurrence(&collection, &occurrence).unwrap();
        assert!((score - 4.0).abs() < 1e-10); // (3 + 4 + 5) / 3
    }

    #[test]
    fn fails_below_two_items() {
        let collection = collection_with_triangle();
        let first = collection.get(0).unwrap().node_indices().next().unwrap();
        let occurrence = Occurrence::new(0, vec![first]);
        let result = CohesionMetric::score_occurrence(&collection, &occurrence);
        assert!(matches!(
            result,
            Err(MetricError::TooFewItems { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn evaluate_aggregates_median() {
        let collection = collection_with_triangle();
        let vertices: Vec<_> = collection.get(0).unwrap().node_indices().collect();
        let occurrence = Occurrence::new(0, vertices);
        let metric = CohesionMetric::new(CohesionMetricConfig::default());
        let evaluation = metric
            .evaluate(&collection, std::slice::from_ref(&occurrence))
            .unwrap();
        assert!((evaluation.aggregate - 4.0).abs() < 1e-10);
        assert!(metric.accepts(&evaluation));
    }

    #[test]
    fn threshold_discards_loose_patterns() {
        let metric = CohesionMetric::new(CohesionMetricConfig {
            maximal_cohesion: 3.0,
        });
        let evaluation = MetricEvaluation {
            occurrence_scores: vec![4.0],
            aggregate: 4.0,
            variance: 0.0,
        };
        assert!(!metric.accepts(&evaluation));
    }

    #[test]
    fn evaluate_without_occurrences_fails() {
        let collection = collection_with_triangle();
        let metric = CohesionMetric::new(CohesionMetricConfig::default());
        assert!(matches!(
            metric.evaluate(&collection, &[]),
            Err(MetricError::NoObservations)
        ));
    }
}
