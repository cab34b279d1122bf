//! Core domain types and SQLite persistence for the offline tile cache.
//!
//! Tiles are addressed by [`TileCoord`] and persisted through [`TileStore`]
//! into a database whose shape matches what osmdroid-based map views read:
//! an `android_metadata` table and a `tiles` table keyed by the value of
//! [`encode_key`].

#![forbid(unsafe_code)]

use std::fmt;

mod config;
mod key;
pub mod store;

pub mod test_support;

pub use config::{
    DEFAULT_EXPIRY_YEARS, DEFAULT_NAMESPACE, DEFAULT_PROVIDER, ExpiryHorizon, TileCacheConfig,
};
pub use key::{MAX_ZOOM, encode_key};
pub use store::{TileStore, TileStoreError, insert_tile};

/// Address of a single tile in the slippy-map scheme.
///
/// Components are signed to mirror the lenient integer parsing used when
/// importing directory trees; [`TileCoord::is_in_bounds`] reports whether a
/// coordinate is a real tile of its zoom level.
///
/// # Examples
///
/// ```
/// use tilecache_core::TileCoord;
///
/// let coord = TileCoord::new(1, 0, 1);
/// assert_eq!(coord.to_string(), "1/0/1");
/// assert_eq!(coord.key(), 5);
/// assert!(coord.is_in_bounds());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level of the pyramid.
    pub zoom: i32,
    /// Horizontal tile index (`x`).
    pub column: i32,
    /// Vertical tile index (`y`).
    pub row: i32,
}

impl TileCoord {
    /// Construct a coordinate from its zoom, column and row.
    #[must_use]
    pub const fn new(zoom: i32, column: i32, row: i32) -> Self {
        Self { zoom, column, row }
    }

    /// Storage key for this coordinate.
    #[must_use]
    pub fn key(&self) -> i64 {
        encode_key(
            i64::from(self.column),
            i64::from(self.row),
            i64::from(self.zoom),
        )
    }

    /// Whether the zoom lies in `0..=MAX_ZOOM` and both indices lie in
    /// `0..2^zoom`.
    ///
    /// Keys of in-bounds coordinates never collide.
    #[must_use]
    pub fn is_in_bounds(&self) -> bool {
        if !(0..=MAX_ZOOM).contains(&self.zoom) {
            return false;
        }
        let extent = 1_i64 << self.zoom;
        let within = |index: i32| (0..extent).contains(&i64::from(index));
        within(self.column) && within(self.row)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}
