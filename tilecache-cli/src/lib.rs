//! Command-line interface for populating the offline tile cache.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tilecache_core::TileCacheConfig;

mod error;
mod import;
mod insert;

pub use error::CliError;

use import::{ImportArgs, run_import};
use insert::{InsertArgs, run_insert};

pub(crate) const ARG_ZOOM: &str = "zoom";
pub(crate) const ARG_COLUMN: &str = "column";
pub(crate) const ARG_ROW: &str = "row";
pub(crate) const ARG_PROVIDER: &str = "provider";
pub(crate) const ARG_TILE_FILE: &str = "file";
pub(crate) const ARG_DIRECTORY: &str = "directory";
pub(crate) const ARG_PROGRESS: &str = "progress";
pub(crate) const ARG_STORAGE_ROOT: &str = "storage-root";
pub(crate) const ARG_NAMESPACE: &str = "namespace";
pub(crate) const ARG_EXPIRY_YEARS: &str = "expiry-years";
pub(crate) const ENV_INSERT_ZOOM: &str = "TILECACHE_CMDS_INSERT_ZOOM";
pub(crate) const ENV_INSERT_COLUMN: &str = "TILECACHE_CMDS_INSERT_COLUMN";
pub(crate) const ENV_INSERT_ROW: &str = "TILECACHE_CMDS_INSERT_ROW";
pub(crate) const ENV_INSERT_FILE: &str = "TILECACHE_CMDS_INSERT_FILE";
pub(crate) const ENV_IMPORT_DIRECTORY: &str = "TILECACHE_CMDS_IMPORT_DIRECTORY";

/// Run the tile cache CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Insert(args) => run_insert(args),
        Command::Import(args) => run_import(args).map(|_| ()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tilecache",
    about = "Populate an osmdroid-compatible offline tile cache",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store one tile image under its coordinate.
    Insert(InsertArgs),
    /// Store every tile found in a `{zoom}/{column}/{row}.{ext}` tree.
    Import(ImportArgs),
}

/// Cache location settings shared by every subcommand.
///
/// Unset values fall back to [`TileCacheConfig::default`].
pub(crate) fn cache_config(
    storage_root: Option<camino::Utf8PathBuf>,
    namespace: Option<String>,
    expiry_years: Option<u32>,
) -> TileCacheConfig {
    let mut config = TileCacheConfig::default();
    if let Some(root) = storage_root {
        config.storage_root = root;
    }
    if let Some(name) = namespace {
        config.namespace = name;
    }
    if let Some(years) = expiry_years {
        config.expiry_years = years;
    }
    config
}

#[cfg(test)]
mod tests;
