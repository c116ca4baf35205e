//! Association-analysis errors.

use super::error_code::{self, MotifErrorCode};

/// Errors raised while measuring statistical dependence between itemsets.
#[derive(Debug, thiserror::Error)]
pub enum AssociationError {
    #[error("presence vectors differ in length ({first} vs {second})")]
    LengthMismatch { first: usize, second: usize },

    #[error("presence vectors are empty")]
    EmptyPresence,
}

impl MotifErrorCode for AssociationError {
    fn error_code(&self) -> &'static str {
        error_code::ASSOCIATION_ERROR
    }
}
