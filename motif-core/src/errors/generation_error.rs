//! Candidate-generation errors.

use super::error_code::{self, MotifErrorCode};

/// Errors raised while growing candidate itemsets over a structure's
/// adjacency graph. A malformed structure excludes that structure only;
/// the run continues without it.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("malformed structure {structure}: {reason}")]
    MalformedStructure { structure: String, reason: String },

    #[error("structure collection is empty")]
    EmptyCollection,
}

impl MotifErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        error_code::GENERATION_ERROR
    }
}
