//! Configuration validation errors.

use super::error_code::{self, MotifErrorCode};

/// Raised when a configuration record cannot be honored. Surfaced
/// immediately at pipeline construction, never mid-run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("minimal support must be within (0, 1], got {0}")]
    InvalidSupport(f64),

    #[error("itemset size bounds invalid: minimal {minimal}, maximal {maximal}")]
    InvalidItemsetSize { minimal: usize, maximal: usize },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("sample size must be at least 2, got {0}")]
    InvalidSampleSize(usize),

    #[error("maximal entries must be at least 1")]
    InvalidMaximalEntries,

    #[error("association cutoff must be within [0, 1], got {0}")]
    InvalidAssociationCutoff(f64),
}

impl MotifErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
