//! Library-assembly and archive errors.

use super::association_error::AssociationError;
use super::config_error::ConfigError;
use super::error_code::{self, MotifErrorCode};

/// Errors raised while assembling or persisting the itemset library.
/// Archive corruption is fatal for the read operation; no partially
/// populated library is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("corrupt archive: {reason}")]
    CorruptArchive { reason: String },

    #[error("no occurrence available to represent {identifier}")]
    MissingRepresentative { identifier: String },

    #[error("association analysis failed: {0}")]
    Association(#[from] AssociationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MotifErrorCode for LibraryError {
    fn error_code(&self) -> &'static str {
        error_code::LIBRARY_ERROR
    }
}
