//! Errors raised by bulk imports.

use camino::Utf8PathBuf;
use thiserror::Error;
use tilecache_core::TileStoreError;

/// Errors that abort a bulk import.
///
/// Files whose paths do not describe a tile are skipped and never surface
/// here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Opening or writing the tile store failed.
    #[error(transparent)]
    Store(#[from] TileStoreError),
    /// A file with a valid tile path could not be read.
    #[error("failed to read tile file {path}")]
    ReadTile {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
