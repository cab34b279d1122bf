//! Bulk loading of tile pyramids into the tile store.

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use tilecache_core::{TileCacheConfig, TileCoord, TileStore, TileStoreError, insert_tile};
use walkdir::{DirEntry, WalkDir};

use crate::{ImportError, ImportEvent, Notifier, ProgressTracker, TileLayout, ZxyLayout};

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Regular files found under the import root.
    pub total_files: u64,
    /// Files stored as tiles.
    pub imported: u64,
    /// Files whose paths did not describe a tile.
    pub skipped: u64,
}

/// Populates the tile cache from directory trees and single tiles.
///
/// The importer walks the tree twice: once to count files so progress can be
/// reported as a percentage, then again to store every file the layout
/// accepts. Each tile commits on its own.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use tempfile::TempDir;
/// use tilecache_core::TileCacheConfig;
/// use tilecache_import::{RecordingNotifier, TileImporter};
///
/// let storage = TempDir::new().expect("storage dir");
/// let tiles = TempDir::new().expect("tile dir");
/// std::fs::create_dir_all(tiles.path().join("0/0")).expect("create pyramid");
/// std::fs::write(tiles.path().join("0/0/0.png"), b"png").expect("write tile");
///
/// let root = Utf8PathBuf::from_path_buf(storage.path().to_path_buf()).expect("utf-8");
/// let source = Utf8PathBuf::from_path_buf(tiles.path().to_path_buf()).expect("utf-8");
/// let notifier = RecordingNotifier::new();
/// let importer = TileImporter::new(TileCacheConfig::new(root), notifier.clone());
///
/// let report = importer
///     .cache_tiles_from_directory(&source, true)
///     .expect("import tiles");
/// assert_eq!(report.imported, 1);
/// assert_eq!(notifier.messages().last().map(String::as_str), Some("Operation completed successfully."));
/// ```
#[derive(Debug, Clone)]
pub struct TileImporter<N, L = ZxyLayout> {
    config: TileCacheConfig,
    notifier: N,
    layout: L,
    provider: Option<String>,
}

impl<N: Notifier> TileImporter<N> {
    /// Importer for the `{zoom}/{column}/{row}.{ext}` layout.
    #[must_use]
    pub const fn new(config: TileCacheConfig, notifier: N) -> Self {
        Self {
            config,
            notifier,
            layout: ZxyLayout,
            provider: None,
        }
    }
}

impl<N: Notifier, L: TileLayout> TileImporter<N, L> {
    /// Read coordinates with a different layout.
    #[must_use]
    pub fn with_layout<M: TileLayout>(self, layout: M) -> TileImporter<N, M> {
        TileImporter {
            config: self.config,
            notifier: self.notifier,
            layout,
            provider: self.provider,
        }
    }

    /// Label imported tiles with `provider` instead of the configured default.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Provider assigned to imported tiles.
    #[must_use]
    pub fn provider(&self) -> &str {
        self.provider
            .as_deref()
            .unwrap_or(&self.config.default_provider)
    }

    /// Cache configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TileCacheConfig {
        &self.config
    }

    /// Notifier receiving progress messages.
    #[must_use]
    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Store a single tile, opening the cache for this call only.
    pub fn insert_tile(
        &self,
        zoom: i32,
        column: i32,
        row: i32,
        provider: &str,
        tile: &[u8],
    ) -> Result<(), TileStoreError> {
        insert_tile(&self.config, zoom, column, row, provider, tile)
    }

    /// Import every tile found under `root`.
    ///
    /// With `show_progress` unset no notification is sent at all. Unreadable
    /// directories are logged and skipped, so a missing root behaves like an
    /// empty one. The store is opened once for the whole import and is not
    /// touched when the tree holds no files.
    pub fn cache_tiles_from_directory(
        &self,
        root: &Utf8Path,
        show_progress: bool,
    ) -> Result<ImportReport, ImportError> {
        let total_files = regular_files(root).fold(0_u64, |count, _| count.saturating_add(1));
        if total_files == 0 {
            info!("no tiles found under {root}");
            self.emit(show_progress, ImportEvent::NoTilesFound);
            return Ok(ImportReport::default());
        }

        self.emit(show_progress, ImportEvent::Started);
        info!("importing {total_files} files from {root}");

        let store = TileStore::open(&self.config)?;
        let provider = self.provider();
        let mut tracker = ProgressTracker::new(total_files);
        let mut report = ImportReport {
            total_files,
            ..ImportReport::default()
        };

        for entry in regular_files(root) {
            let Some((path, coord)) = self.locate(root, entry) else {
                report.skipped = report.skipped.saturating_add(1);
                continue;
            };
            let tile = tilecache_fs::read_file_bytes(&path)
                .map_err(|source| ImportError::ReadTile { path, source })?;
            store.upsert(coord, provider, &tile)?;
            report.imported = report.imported.saturating_add(1);

            if show_progress && let Some(percentage) = tracker.record(report.imported) {
                self.emit(true, ImportEvent::Progress(percentage));
            }
        }

        self.emit(show_progress, ImportEvent::Completed);
        info!(
            "imported {} tiles from {root} into {} ({} skipped)",
            report.imported,
            store.path(),
            report.skipped
        );
        Ok(report)
    }

    fn locate(&self, root: &Utf8Path, entry: DirEntry) -> Option<(Utf8PathBuf, TileCoord)> {
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            debug!("skipping non UTF-8 path under {root}");
            return None;
        };
        let coord = path
            .strip_prefix(root)
            .ok()
            .and_then(|relative| self.layout.parse_coordinates(relative));
        if coord.is_none() {
            debug!("skipping {path}: not a tile path");
        }
        coord.map(|coord| (path, coord))
    }

    fn emit(&self, show_progress: bool, event: ImportEvent) {
        if show_progress {
            self.notifier.notify(&event.to_string());
        }
    }
}

/// Regular files under `root` in depth-first, name-sorted order.
fn regular_files(root: &Utf8Path) -> impl Iterator<Item = DirEntry> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            entry
                .map_err(|err| warn!("skipping unreadable entry under {root}: {err}"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
}
