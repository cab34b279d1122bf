//! Errors raised by the tile store.

use camino::Utf8PathBuf;
use rusqlite::Error as SqliteError;
use thiserror::Error;

use crate::TileCoord;

/// Errors raised when opening, initialising or writing the tile database.
#[derive(Debug, Error)]
pub enum TileStoreError {
    /// The directory that should hold the database could not be created.
    #[error("failed to create cache directory for {path}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening or creating the SQLite database failed.
    #[error("failed to open tile database at {path}")]
    Open {
        /// Location of the database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A schema statement failed; the surrounding transaction was rolled back.
    #[error("failed to execute schema step '{step}'")]
    Migration {
        /// Name of the failing step.
        step: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// The expiry horizon pushes the timestamp past the supported range.
    #[error("expiry horizon of {years} years is out of range")]
    ExpiryOutOfRange {
        /// Configured horizon.
        years: u32,
    },
    /// Writing a tile row failed.
    #[error("failed to store tile {coord} for provider {provider:?}")]
    Upsert {
        /// Address of the tile being written.
        coord: TileCoord,
        /// Provider label of the tile.
        provider: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}
