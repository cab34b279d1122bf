//! Focused unit tests covering insert CLI configuration and execution.

use super::*;
use crate::insert::{InsertConfig, config_from_layers_for_test, execute_insert};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;
use tilecache_core::{TileCoord, test_support::load_tiles};

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn tile(&self, name: &str, payload: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(&path, payload).expect("write tile image");
        path
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
    Workspace { _dir: dir, root }
}

fn complete_args() -> InsertArgs {
    InsertArgs {
        file: Some(Utf8PathBuf::from("tile.png")),
        zoom: Some(5),
        column: Some(3),
        row: Some(2),
        ..InsertArgs::default()
    }
}

#[rstest]
#[case::file(InsertArgs { file: None, ..complete_args() }, ARG_TILE_FILE, ENV_INSERT_FILE)]
#[case::zoom(InsertArgs { zoom: None, ..complete_args() }, ARG_ZOOM, ENV_INSERT_ZOOM)]
#[case::column(InsertArgs { column: None, ..complete_args() }, ARG_COLUMN, ENV_INSERT_COLUMN)]
#[case::row(InsertArgs { row: None, ..complete_args() }, ARG_ROW, ENV_INSERT_ROW)]
fn converting_without_required_fields_errors(
    #[case] args: InsertArgs,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let err = InsertConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_applies_cache_defaults() {
    let config = InsertConfig::try_from(complete_args()).expect("complete args convert");
    assert_eq!(config.coord, TileCoord::new(5, 3, 2));
    assert_eq!(config.provider, "CustomTiles");
    assert_eq!(config.cache, TileCacheConfig::default());
}

#[rstest]
fn converting_honours_cache_overrides() {
    let args = InsertArgs {
        provider: Some("Mapnik".to_owned()),
        storage_root: Some(Utf8PathBuf::from("/data/files")),
        namespace: Some("maps".to_owned()),
        expiry_years: Some(2),
        ..complete_args()
    };
    let config = InsertConfig::try_from(args).expect("complete args convert");
    assert_eq!(config.provider, "Mapnik");
    assert_eq!(
        config.cache.database_path().as_str(),
        "/data/files/maps/tiles/cache.db"
    );
    assert_eq!(config.cache.expiry_years, 2);
}

#[rstest]
fn validate_sources_reports_missing_files(workspace: Workspace) {
    let config = InsertConfig {
        file: workspace.root.join("missing.png"),
        ..InsertConfig::try_from(complete_args()).expect("complete args convert")
    };
    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_TILE_FILE);
            assert_eq!(path, workspace.root.join("missing.png"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let config = InsertConfig {
        file: workspace.root.clone(),
        ..InsertConfig::try_from(complete_args()).expect("complete args convert")
    };
    let err = config
        .validate_sources()
        .expect_err("expected directory rejection");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_TILE_FILE),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn execute_insert_stores_the_tile(workspace: Workspace) {
    let file = workspace.tile("tile.png", b"png bytes");
    let config = InsertConfig {
        cache: TileCacheConfig::new(workspace.root.join("storage")),
        coord: TileCoord::new(5, 3, 2),
        provider: "P".to_owned(),
        file,
    };
    config.validate_sources().expect("tile image exists");

    execute_insert(&config).expect("insert tile");

    let tiles = load_tiles(&config.cache.database_path()).expect("load tiles");
    assert_eq!(tiles.len(), 1);
    let tile = tiles.first().expect("one tile");
    assert_eq!(tile.key, 5218);
    assert_eq!(tile.provider, "P");
    assert_eq!(tile.tile, b"png bytes");
}

#[rstest]
fn merge_layers_prefers_cli_over_env_and_file() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "file": "from-file.png",
            "zoom": 1,
            "column": 1,
            "row": 1,
            "provider": "FromFile",
        }),
        None,
    );
    composer.push_environment(json!({
        "zoom": 12,
        "column": 654,
        "row": 1583,
    }));
    composer.push_cli(json!({
        "file": "from-cli.png",
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.file, Utf8PathBuf::from("from-cli.png"));
    assert_eq!(config.coord, TileCoord::new(12, 654, 1583));
    assert_eq!(config.provider, "FromFile");
}

#[rstest]
fn merge_layers_reports_invalid_values() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "zoom": "twelve" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}
