//! Facade crate for the offline tile cache.
//!
//! Re-exports the coordinate, key and store types from `tilecache-core` and
//! the bulk importer from `tilecache-import`, so hosts depend on one crate.

#![forbid(unsafe_code)]

pub use tilecache_core::{
    DEFAULT_EXPIRY_YEARS, DEFAULT_NAMESPACE, DEFAULT_PROVIDER, ExpiryHorizon, MAX_ZOOM,
    TileCacheConfig, TileCoord, TileStore, TileStoreError, encode_key, insert_tile,
};

pub use tilecache_import::{
    ChannelNotifier, ImportError, ImportEvent, ImportReport, LogNotifier, Notifier,
    ProgressTracker, RecordingNotifier, TileImporter, TileLayout, ZxyLayout,
};
