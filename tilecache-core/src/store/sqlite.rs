//! SQLite-backed tile store.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, params};

use crate::{ExpiryHorizon, TileCacheConfig, TileCoord};

use super::{TileStoreError, initialise_schema};

const UPSERT_TILE: &str =
    "INSERT OR REPLACE INTO tiles (key, provider, tile, expires) VALUES (?1, ?2, ?3, ?4)";

/// Writable tile cache backed by one SQLite database file.
///
/// Opening the store creates the file, its parent directories and the schema
/// when missing. Every [`TileStore::upsert`] commits on its own, so an
/// interrupted bulk load leaves all earlier tiles readable.
pub struct TileStore {
    connection: Connection,
    path: Utf8PathBuf,
    expiry: ExpiryHorizon,
}

impl fmt::Debug for TileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileStore")
            .field("path", &self.path)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TileStore {
    /// Open the store at the location described by `config`.
    pub fn open(config: &TileCacheConfig) -> Result<Self, TileStoreError> {
        Self::open_at(&config.database_path(), config.expiry())
    }

    /// Open (or create) the store at an explicit database path.
    pub fn open_at(path: &Utf8Path, expiry: ExpiryHorizon) -> Result<Self, TileStoreError> {
        tilecache_fs::ensure_parent_dir(path).map_err(|source| {
            TileStoreError::CreateDirectory {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let mut connection =
            Connection::open(path.as_std_path()).map_err(|source| TileStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        initialise_schema(&mut connection)?;
        debug!("opened tile cache at {path}");

        Ok(Self {
            connection,
            path: path.to_path_buf(),
            expiry,
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Horizon used to stamp new tiles.
    #[must_use]
    pub const fn expiry(&self) -> ExpiryHorizon {
        self.expiry
    }

    /// Insert or replace the tile stored for `coord` and `provider`.
    ///
    /// The row expires one horizon after the current time.
    pub fn upsert(
        &self,
        coord: TileCoord,
        provider: &str,
        tile: &[u8],
    ) -> Result<(), TileStoreError> {
        self.upsert_at(coord, provider, tile, Utc::now())
    }

    /// Insert or replace a tile as if it were written at `now`.
    pub fn upsert_at(
        &self,
        coord: TileCoord,
        provider: &str,
        tile: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), TileStoreError> {
        let expires = self
            .expiry
            .expires_at(now)
            .ok_or(TileStoreError::ExpiryOutOfRange {
                years: self.expiry.as_years(),
            })?;
        let key = coord.key();

        self.connection
            .prepare_cached(UPSERT_TILE)
            .and_then(|mut statement| statement.execute(params![key, provider, tile, expires]))
            .map_err(|source| TileStoreError::Upsert {
                coord,
                provider: provider.to_owned(),
                source,
            })?;
        debug!("stored tile {coord} ({} bytes) for {provider}", tile.len());
        Ok(())
    }
}

/// Open the cache described by `config`, store one tile and close it again.
///
/// # Examples
/// ```
/// use tempfile::TempDir;
/// use tilecache_core::{TileCacheConfig, insert_tile};
///
/// let dir = TempDir::new().expect("create temp dir");
/// let root = dir.path().to_str().expect("utf-8 temp dir");
/// let config = TileCacheConfig::new(root);
///
/// insert_tile(&config, 5, 3, 2, "P", b"png bytes").expect("store tile");
/// assert!(config.database_path().exists());
/// ```
pub fn insert_tile(
    config: &TileCacheConfig,
    zoom: i32,
    column: i32,
    row: i32,
    provider: &str,
    tile: &[u8],
) -> Result<(), TileStoreError> {
    let store = TileStore::open(config)?;
    store.upsert(TileCoord::new(zoom, column, row), provider, tile)
}
