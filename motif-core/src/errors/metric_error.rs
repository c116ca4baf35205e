//! Extraction-metric errors.

use super::error_code::{self, MotifErrorCode};

/// Errors raised while scoring itemset occurrences. Metric failures
/// discard the affected candidate; they never abort the run.
#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("cohesion undefined for {actual} item(s), at least {required} required")]
    TooFewItems { required: usize, actual: usize },

    #[error("missing or non-finite coordinates in structure {structure}")]
    MissingCoordinates { structure: String },

    #[error("no occurrences to evaluate")]
    NoObservations,
}

impl MotifErrorCode for MetricError {
    fn error_code(&self) -> &'static str {
        error_code::METRIC_ERROR
    }
}
