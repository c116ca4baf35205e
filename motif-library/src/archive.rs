//! Single-file compressed archive for the itemset library.
//!
//! The container is a zstd-compressed JSON document with kebab-case keys.
//! Reads are strict: the container must decompress, the document must
//! match the schema exactly, and every entry must be internally
//! consistent — otherwise the read fails with a corrupt-archive error and
//! returns nothing.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use motif_core::errors::LibraryError;

use crate::model::{ItemsetLibrary, ItemsetLibraryEntry};

/// Bumped on any incompatible change to the document layout.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ArchiveDocument {
    format_version: u32,
    minimal_cluster_size: usize,
    maximal_entries: usize,
    entries: Vec<ItemsetLibraryEntry>,
}

impl ItemsetLibrary {
    /// Write the library to a single compressed archive.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), LibraryError> {
        let document = ArchiveDocument {
            format_version: FORMAT_VERSION,
            minimal_cluster_size: self.minimal_cluster_size(),
            maximal_entries: self.maximal_entries(),
            entries: self.entries().to_vec(),
        };
        let file = File::create(path.as_ref())?;
        let mut encoder = zstd::Encoder::new(file, 0)?;
        serde_json::to_writer(&mut encoder, &document).map_err(|error| {
            LibraryError::CorruptArchive {
                reason: format!("serialization failed: {error}"),
            }
        })?;
        encoder.finish()?;
        tracing::info!(path = %path.as_ref().display(), entries = self.len(), "archive written");
        Ok(())
    }

    /// Read a library back from an archive, validating its integrity.
    pub fn read_from_path(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let file = File::open(path.as_ref())?;
        let decoder = zstd::Decoder::new(file).map_err(|error| LibraryError::CorruptArchive {
            reason: format!("not a valid compressed container: {error}"),
        })?;
        let document: ArchiveDocument =
            serde_json::from_reader(decoder).map_err(|error| LibraryError::CorruptArchive {
                reason: format!("document does not match the archive schema: {error}"),
            })?;
        if document.format_version != FORMAT_VERSION {
            return Err(LibraryError::CorruptArchive {
                reason: format!(
                    "unsupported format version {} (expected {})",
                    document.format_version, FORMAT_VERSION
                ),
            });
        }
        for entry in &document.entries {
            entry.validate()?;
        }
        Ok(ItemsetLibrary::from_parts(
            document.entries,
            document.minimal_cluster_size,
            document.maximal_entries,
        ))
    }
}
