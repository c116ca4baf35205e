//! Geometric extraction metrics.
//!
//! Cohesion and adherence are two variants of one extraction-metric
//! capability: both map a set of itemset occurrences to per-occurrence
//! scores plus an aggregate, and both expose an acceptance threshold that
//! prunes candidates before significance testing. Lower scores are better
//! (tighter geometry, closer to consensus).

pub mod adherence;
pub mod cohesion;
pub mod geometry;

pub use adherence::AdherenceMetric;
pub use cohesion::CohesionMetric;

use motif_core::config::{
    AdherenceMetricConfig, CohesionMetricConfig, SignificanceType,
};
use motif_core::errors::MetricError;
use motif_core::types::{Occurrence, StructureCollection};

/// Which extraction-metric variant produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Cohesion,
    Adherence,
}

/// Scores of one itemset under one extraction metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvaluation {
    /// One score per occurrence, in occurrence order.
    pub occurrence_scores: Vec<f64>,
    /// The itemset-level score the acceptance threshold applies to.
    pub aggregate: f64,
    /// Spread of the per-occurrence scores.
    pub variance: f64,
}

/// The shared extraction-metric capability.
///
/// Implementations must be pure functions of the read-only structure
/// collection so evaluations can run on any worker.
pub trait ExtractionMetric: Send + Sync {
    fn kind(&self) -> MetricKind;

    /// Score every occurrence of one itemset and aggregate.
    fn evaluate(
        &self,
        collection: &StructureCollection,
        occurrences: &[Occurrence],
    ) -> Result<MetricEvaluation, MetricError>;

    /// Whether an evaluated itemset survives this metric's threshold.
    fn accepts(&self, evaluation: &MetricEvaluation) -> bool;
}

/// Select the metric variant the configuration asks for.
pub fn metric_for(
    significance_type: SignificanceType,
    cohesion: &CohesionMetricConfig,
    adherence: &AdherenceMetricConfig,
) -> Box<dyn ExtractionMetric> {
    match significance_type {
        SignificanceType::Cohesion => Box::new(CohesionMetric::new(cohesion.clone())),
        SignificanceType::Adherence => Box::new(AdherenceMetric::new(adherence.clone())),
    }
}
