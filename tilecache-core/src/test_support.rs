//! Test-only helpers for inspecting a tile database directly.
//!
//! The crate exposes no read path for tiles; map views query the database on
//! their own. Tests use these helpers to look at what was written.

use camino::Utf8Path;
use rusqlite::{Connection, OpenFlags};

/// One row of the `tiles` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTile {
    /// Encoded tile key.
    pub key: i64,
    /// Provider label.
    pub provider: String,
    /// Stored payload.
    pub tile: Vec<u8>,
    /// Expiry in milliseconds since the Unix epoch.
    pub expires: i64,
}

/// Load every stored tile ordered by key, then provider.
pub fn load_tiles(database: &Utf8Path) -> rusqlite::Result<Vec<StoredTile>> {
    let connection =
        Connection::open_with_flags(database.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut statement = connection
        .prepare("SELECT key, provider, tile, expires FROM tiles ORDER BY key, provider")?;
    let tiles = statement
        .query_map([], |row| {
            Ok(StoredTile {
                key: row.get(0)?,
                provider: row.get(1)?,
                tile: row.get(2)?,
                expires: row.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tiles)
}

/// Load the locales recorded in `android_metadata`.
pub fn load_metadata_locales(database: &Utf8Path) -> rusqlite::Result<Vec<String>> {
    let connection =
        Connection::open_with_flags(database.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let mut statement = connection.prepare("SELECT locale FROM android_metadata")?;
    let locales = statement
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(locales)
}
