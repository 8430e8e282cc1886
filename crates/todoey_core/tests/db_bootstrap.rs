use rusqlite::Connection;
use todoey_core::db::migrations::latest_version;
use todoey_core::db::{open_db, open_db_in_memory, with_write_tx, DbError};
use todoey_core::{RecordKind, RepoError, SqliteCategoryRepository, SqliteItemRepository};

#[test]
fn open_db_in_memory_applies_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "categories");
    assert_table_exists(&conn, "items");

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todoey.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "items");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_write_transaction_leaves_no_partial_state() {
    let conn = open_db_in_memory().unwrap();

    let result: Result<(), RepoError> = with_write_tx(&conn, |tx| {
        tx.execute(
            "INSERT INTO categories (uuid, name, colour) VALUES ('a', 'first', 'AAAAAA');",
            [],
        )?;
        // Violates the colour length check.
        tx.execute(
            "INSERT INTO categories (uuid, name, colour) VALUES ('b', 'second', 'bad');",
            [],
        )?;
        Ok(())
    });
    assert!(result.is_err());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn repositories_reject_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteCategoryRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repositories_reject_connection_without_foreign_keys() {
    let conn = Connection::open_in_memory().unwrap();
    // The bundled SQLite defaults foreign keys to on.
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = OFF; PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::ForeignKeysDisabled)));
}

#[test]
fn repositories_reject_connection_missing_tables_or_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON; PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let result = SqliteCategoryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("categories"))
    ));

    conn.execute_batch(
        "CREATE TABLE categories (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            uuid TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL DEFAULT ''
        );",
    )
    .unwrap();

    let result = SqliteCategoryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "categories",
            column: "colour"
        })
    ));
}

#[test]
fn schema_columns_match_required_columns() {
    let conn = open_db_in_memory().unwrap();

    for kind in [RecordKind::Category, RecordKind::Item] {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({});", kind.table()))
            .unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(1))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(columns, kind.required_columns(), "table {}", kind.table());
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
