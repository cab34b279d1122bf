//! Import command implementation for the tile cache CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tilecache_core::TileCacheConfig;
use tilecache_import::{ImportReport, LogNotifier, Notifier, TileImporter};

use crate::{
    ARG_DIRECTORY, ARG_EXPIRY_YEARS, ARG_NAMESPACE, ARG_PROGRESS, ARG_PROVIDER, ARG_STORAGE_ROOT,
    CliError, ENV_IMPORT_DIRECTORY, cache_config,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Walk a directory laid out as {zoom}/{column}/{row}.{ext} \
                 and store every tile it contains. Files that do not match \
                 the layout are skipped.",
    about = "Import a directory of tiles"
)]
#[ortho_config(prefix = "TILECACHE")]
pub(crate) struct ImportArgs {
    /// Root of the tile pyramid.
    #[arg(value_name = "dir")]
    #[serde(default)]
    pub(crate) directory: Option<Utf8PathBuf>,
    /// Log progress messages while importing.
    #[arg(long = ARG_PROGRESS)]
    #[serde(default)]
    pub(crate) progress: bool,
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
    /// Years until imported tiles expire; defaults to 10.
    #[arg(long = ARG_EXPIRY_YEARS, value_name = "years")]
    #[serde(default)]
    pub(crate) expiry_years: Option<u32>,
}

impl ImportArgs {
    pub(crate) fn into_config(self) -> Result<ImportConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ImportConfig::try_from(merged)
    }
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    /// Cache the tiles are written to, including the provider label.
    pub(crate) cache: TileCacheConfig,
    /// Root of the tile pyramid.
    pub(crate) directory: Utf8PathBuf,
    /// Whether progress messages are emitted.
    pub(crate) progress: bool,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let directory = args.directory.ok_or(CliError::MissingArgument {
            field: ARG_DIRECTORY,
            env: ENV_IMPORT_DIRECTORY,
        })?;
        let mut cache = cache_config(args.storage_root, args.namespace, args.expiry_years);
        if let Some(provider) = args.provider {
            cache.default_provider = provider;
        }
        Ok(Self {
            cache,
            directory,
            progress: args.progress,
        })
    }
}

pub(super) fn run_import(args: ImportArgs) -> Result<ImportReport, CliError> {
    let config = args.into_config()?;
    execute_import(&config, LogNotifier)
}

pub(super) fn execute_import<N: Notifier>(
    config: &ImportConfig,
    notifier: N,
) -> Result<ImportReport, CliError> {
    let importer = TileImporter::new(config.cache.clone(), notifier);
    let report = importer.cache_tiles_from_directory(&config.directory, config.progress)?;
    info!(
        "{} of {} files from {} stored in {}",
        report.imported,
        report.total_files,
        config.directory,
        config.cache.database_path()
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ImportConfig, CliError> {
    let merged = ImportArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ImportConfig::try_from(merged)
}
