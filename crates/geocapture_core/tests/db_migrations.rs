use geocapture_core::db::migrations::latest_version;
use geocapture_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "locations");
}

#[test]
fn locations_table_has_original_column_shape() {
    let conn = open_db_in_memory().unwrap();

    let mut stmt = conn.prepare("PRAGMA table_info(locations);").unwrap();
    let columns: Vec<(String, String, i64)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?, row.get(5)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string(), 1),
            ("latitude".to_string(), "REAL".to_string(), 0),
            ("longitude".to_string(), "REAL".to_string(), 0),
        ]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "locations");
}

#[test]
fn unversioned_database_from_mobile_app_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS locations (id INTEGER PRIMARY KEY AUTOINCREMENT, latitude REAL, longitude REAL);
             INSERT INTO locations (latitude, longitude) VALUES (-23.5, -46.6);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM locations;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
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
fn open_failure_names_the_database_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("locations.db");

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Open { target, .. } => assert_eq!(target, &path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("locations.db"));
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
