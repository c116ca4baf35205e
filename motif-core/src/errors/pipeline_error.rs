//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, MotifErrorCode};
use super::{
    AssociationError, ConfigError, GenerationError, LibraryError, MetricError, SignificanceError,
};

/// Errors that can occur during a mining run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("candidate generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("extraction metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("association error: {0}")]
    Association(#[from] AssociationError),

    #[error("significance estimation error: {0}")]
    Significance(#[from] SignificanceError),

    #[error("library error: {0}")]
    Library(#[from] LibraryError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("run cancelled")]
    Cancelled,
}

impl MotifErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Generation(e) => e.error_code(),
            Self::Metric(e) => e.error_code(),
            Self::Association(e) => e.error_code(),
            Self::Significance(e) => e.error_code(),
            Self::Library(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::WorkerPool(_) => error_code::CONFIG_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

/// Result of a run that accumulates non-fatal errors.
/// Per-structure and per-itemset failures are isolated here so partial
/// results survive them.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
