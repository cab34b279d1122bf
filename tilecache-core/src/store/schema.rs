use rusqlite::{Connection, Transaction};

use super::TileStoreError;

/// Locale recorded in the `android_metadata` table.
pub const METADATA_LOCALE: &str = "en_US";

/// Create the tile cache tables inside an open SQLite database.
///
/// All statements run in one transaction: if any step fails nothing is
/// committed and the database is left as it was. Running the function on an
/// initialised database changes nothing; the metadata row is only inserted
/// when the table is empty.
///
/// # Examples
/// ```
/// use rusqlite::Connection;
/// use tilecache_core::store::initialise_schema;
///
/// let mut conn = Connection::open_in_memory().expect("create in-memory database");
/// initialise_schema(&mut conn).expect("create tile schema");
/// initialise_schema(&mut conn).expect("initialisation is idempotent");
///
/// let locales: i64 = conn
///     .query_row("SELECT COUNT(*) FROM android_metadata", [], |row| row.get(0))
///     .expect("count metadata rows");
/// assert_eq!(locales, 1);
/// ```
pub fn initialise_schema(connection: &mut Connection) -> Result<(), TileStoreError> {
    let transaction = connection
        .transaction()
        .map_err(|source| TileStoreError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_metadata(&transaction)?;
    create_tiles(&transaction)?;

    transaction
        .commit()
        .map_err(|source| TileStoreError::Migration {
            step: "commit schema transaction",
            source,
        })
}

fn create_metadata(transaction: &Transaction<'_>) -> Result<(), TileStoreError> {
    run_migration_step(
        transaction,
        "create android_metadata",
        "CREATE TABLE IF NOT EXISTS android_metadata (locale TEXT)",
    )?;
    transaction
        .execute(
            "INSERT INTO android_metadata (locale)
                SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM android_metadata)",
            [METADATA_LOCALE],
        )
        .map(|_| ())
        .map_err(|source| TileStoreError::Migration {
            step: "seed android_metadata",
            source,
        })
}

fn create_tiles(transaction: &Transaction<'_>) -> Result<(), TileStoreError> {
    // The composite key lets one coordinate be cached for several providers.
    run_migration_step(
        transaction,
        "create tiles",
        "CREATE TABLE IF NOT EXISTS tiles (
            key INTEGER,
            provider TEXT,
            tile BLOB,
            expires INTEGER,
            PRIMARY KEY (key, provider)
        )",
    )?;
    run_migration_step(
        transaction,
        "index tiles expiry",
        "CREATE INDEX IF NOT EXISTS expires_index ON tiles (expires)",
    )
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), TileStoreError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| TileStoreError::Migration { step, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn connection() -> Connection {
        Connection::open_in_memory().expect("create in-memory database")
    }

    fn object_names(connection: &Connection, kind: &str) -> Vec<String> {
        let mut statement = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name")
            .expect("prepare schema query");
        let names = statement
            .query_map([kind], |row| row.get(0))
            .expect("query schema")
            .collect::<Result<_, _>>()
            .expect("read schema names");
        names
    }

    #[rstest]
    fn creates_tables_and_index(mut connection: Connection) {
        initialise_schema(&mut connection).expect("initialise schema");

        let tables = object_names(&connection, "table");
        assert!(tables.contains(&"android_metadata".to_owned()));
        assert!(tables.contains(&"tiles".to_owned()));
        assert!(object_names(&connection, "index").contains(&"expires_index".to_owned()));
    }

    #[rstest]
    fn tiles_are_keyed_by_key_and_provider(mut connection: Connection) {
        initialise_schema(&mut connection).expect("initialise schema");

        let primary_key: Vec<(i64, String)> = connection
            .prepare("SELECT pk, name FROM pragma_table_info('tiles') WHERE pk > 0 ORDER BY pk")
            .expect("prepare table info query")
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .expect("query table info")
            .collect::<Result<_, _>>()
            .expect("read table info");
        assert_eq!(
            primary_key,
            vec![(1, "key".to_owned()), (2, "provider".to_owned())]
        );
    }

    #[rstest]
    fn seeds_a_single_locale_row(mut connection: Connection) {
        initialise_schema(&mut connection).expect("first initialisation");
        initialise_schema(&mut connection).expect("second initialisation");
        initialise_schema(&mut connection).expect("third initialisation");

        let locales: Vec<String> = connection
            .prepare("SELECT locale FROM android_metadata")
            .expect("prepare metadata query")
            .query_map([], |row| row.get(0))
            .expect("query metadata")
            .collect::<Result<_, _>>()
            .expect("read metadata");
        assert_eq!(locales, vec![METADATA_LOCALE.to_owned()]);
    }

    #[rstest]
    fn failing_step_rolls_back_the_whole_transaction(mut connection: Connection) {
        // A view named `tiles` cannot be indexed, so the last step fails after
        // the metadata table has been created inside the transaction.
        connection
            .execute("CREATE VIEW tiles AS SELECT 1 AS key", [])
            .expect("create conflicting view");

        let err = initialise_schema(&mut connection).expect_err("schema should fail");
        assert!(matches!(
            err,
            TileStoreError::Migration {
                step: "index tiles expiry",
                ..
            }
        ));
        assert!(
            !object_names(&connection, "table").contains(&"android_metadata".to_owned()),
            "metadata table should have been rolled back"
        );
    }
}
