//! Insert command implementation for the tile cache CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tilecache_core::{TileCacheConfig, TileCoord, insert_tile};

use crate::{
    ARG_COLUMN, ARG_EXPIRY_YEARS, ARG_NAMESPACE, ARG_PROVIDER, ARG_ROW, ARG_STORAGE_ROOT,
    ARG_TILE_FILE, ARG_ZOOM, CliError, ENV_INSERT_COLUMN, ENV_INSERT_FILE, ENV_INSERT_ROW,
    ENV_INSERT_ZOOM, cache_config,
};

/// CLI arguments for the `insert` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Store a single tile image in the cache under its zoom, \
                 column and row. An existing tile for the same coordinate \
                 and provider is replaced.",
    about = "Store one tile image"
)]
#[ortho_config(prefix = "TILECACHE")]
pub(crate) struct InsertArgs {
    /// Path to the tile image.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) file: Option<Utf8PathBuf>,
    /// Zoom level of the tile.
    #[arg(long = ARG_ZOOM, value_name = "level")]
    #[serde(default)]
    pub(crate) zoom: Option<i32>,
    /// Tile column (x).
    #[arg(long = ARG_COLUMN, value_name = "x")]
    #[serde(default)]
    pub(crate) column: Option<i32>,
    /// Tile row (y).
    #[arg(long = ARG_ROW, value_name = "y")]
    #[serde(default)]
    pub(crate) row: Option<i32>,
    /// Provider label; defaults to "CustomTiles".
    #[arg(long = ARG_PROVIDER, value_name = "name")]
    #[serde(default)]
    pub(crate) provider: Option<String>,
    /// Directory under which `osmdroid/tiles/cache.db` is created.
    #[arg(long = ARG_STORAGE_ROOT, value_name = "dir")]
    #[serde(default)]
    pub(crate) storage_root: Option<Utf8PathBuf>,
    /// Cache namespace directory; defaults to "osmdroid".
    #[arg(long = ARG_NAMESPACE, value_name = "name")]
    #[serde(default)]
    pub(crate) namespace: Option<String>,
    /// Years until the stored tile expires; defaults to 10.
    #[arg(long = ARG_EXPIRY_YEARS, value_name = "years")]
    #[serde(default)]
    pub(crate) expiry_years: Option<u32>,
}

impl InsertArgs {
    pub(crate) fn into_config(self) -> Result<InsertConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        InsertConfig::try_from(merged)
    }
}

/// Resolved `insert` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InsertConfig {
    /// Cache the tile is written to.
    pub(crate) cache: TileCacheConfig,
    /// Address of the tile.
    pub(crate) coord: TileCoord,
    /// Provider label stored with the tile.
    pub(crate) provider: String,
    /// Tile image on disk.
    pub(crate) file: Utf8PathBuf,
}

impl InsertConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.file, ARG_TILE_FILE)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match tilecache_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<InsertArgs> for InsertConfig {
    type Error = CliError;

    fn try_from(args: InsertArgs) -> Result<Self, Self::Error> {
        let file = args.file.ok_or(CliError::MissingArgument {
            field: ARG_TILE_FILE,
            env: ENV_INSERT_FILE,
        })?;
        let zoom = args.zoom.ok_or(CliError::MissingArgument {
            field: ARG_ZOOM,
            env: ENV_INSERT_ZOOM,
        })?;
        let column = args.column.ok_or(CliError::MissingArgument {
            field: ARG_COLUMN,
            env: ENV_INSERT_COLUMN,
        })?;
        let row = args.row.ok_or(CliError::MissingArgument {
            field: ARG_ROW,
            env: ENV_INSERT_ROW,
        })?;
        let cache = cache_config(args.storage_root, args.namespace, args.expiry_years);
        let provider = args
            .provider
            .unwrap_or_else(|| cache.default_provider.clone());
        Ok(Self {
            cache,
            coord: TileCoord::new(zoom, column, row),
            provider,
            file,
        })
    }
}

pub(super) fn run_insert(args: InsertArgs) -> Result<(), CliError> {
    let config = resolve_insert_config(args)?;
    execute_insert(&config)
}

fn resolve_insert_config(args: InsertArgs) -> Result<InsertConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_insert(config: &InsertConfig) -> Result<(), CliError> {
    let tile = tilecache_fs::read_file_bytes(&config.file).map_err(|source| CliError::ReadTile {
        path: config.file.clone(),
        source,
    })?;
    let TileCoord { zoom, column, row } = config.coord;
    insert_tile(&config.cache, zoom, column, row, &config.provider, &tile)?;
    info!(
        "stored tile {} for provider {:?} in {}",
        config.coord,
        config.provider,
        config.cache.database_path()
    );
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<InsertConfig, CliError> {
    let merged = InsertArgs::merge_from_layers(layers).map_err(CliError::from)?;
    InsertConfig::try_from(merged)
}
