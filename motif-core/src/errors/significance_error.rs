//! Significance-estimation errors.

use super::error_code::{self, MotifErrorCode};
use super::metric_error::MetricError;

/// Errors raised while estimating one itemset's significance. Each failure
/// is confined to its itemset; other evaluations proceed.
#[derive(Debug, thiserror::Error)]
pub enum SignificanceError {
    #[error(
        "cannot sample a null distribution for {identifier}: \
         {sampled} valid draw(s) of size {size}, at least {required} required"
    )]
    InsufficientPopulation {
        identifier: String,
        size: usize,
        sampled: usize,
        required: usize,
    },

    #[error("no observed scores for {identifier}")]
    NoObservedScores { identifier: String },

    #[error("metric evaluation failed: {0}")]
    Metric(#[from] MetricError),
}

impl MotifErrorCode for SignificanceError {
    fn error_code(&self) -> &'static str {
        error_code::SIGNIFICANCE_ERROR
    }
}
