use geocapture_core::db::migrations::latest_version;
use geocapture_core::{
    Coordinate, LocationRepository, RepoError, SqliteLocationRepository,
};
use rusqlite::Connection;

#[test]
fn append_then_load_all_returns_records_in_insertion_order() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();
    let inputs = [
        Coordinate::new(10.5, -20.25),
        Coordinate::new(-23.55, -46.63),
        Coordinate::new(0.0, 0.0),
        Coordinate::new(51.5, -0.12),
    ];

    for coordinate in &inputs {
        repo.append(coordinate).unwrap();
    }

    let records = repo.load_all().unwrap();
    assert_eq!(records.len(), inputs.len());
    for (index, (record, coordinate)) in records.iter().zip(inputs.iter()).enumerate() {
        assert_eq!(record.id, index as i64 + 1);
        assert_eq!(record.coordinate(), *coordinate);
    }
}

#[test]
fn append_returns_storage_assigned_record() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();

    let first = repo.append(&Coordinate::new(1.0, 2.0)).unwrap();
    let second = repo.append(&Coordinate::new(3.0, 4.0)).unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(second.latitude, 3.0);
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn ids_are_not_reused_after_rows_disappear() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();
    repo.append(&Coordinate::new(1.0, 1.0)).unwrap();
    repo.append(&Coordinate::new(2.0, 2.0)).unwrap();
    repo.connection()
        .execute("DELETE FROM locations WHERE id = 2;", [])
        .unwrap();

    let next = repo.append(&Coordinate::new(3.0, 3.0)).unwrap();
    assert_eq!(next.id, 3);
}

#[test]
fn append_accepts_out_of_range_coordinates() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();

    let record = repo.append(&Coordinate::new(200.0, -999.5)).unwrap();
    assert_eq!(record.coordinate(), Coordinate::new(200.0, -999.5));
}

#[test]
fn append_rejects_non_finite_coordinates_without_writing() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();

    let err = repo.append(&Coordinate::new(f64::NAN, 1.0)).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn ensure_schema_is_idempotent() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();
    repo.append(&Coordinate::new(5.0, 6.0)).unwrap();

    for _ in 0..5 {
        repo.ensure_schema().unwrap();
    }

    assert_eq!(repo.load_all().unwrap().len(), 1);
    let version: u32 = repo
        .connection()
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn ensure_schema_creates_table_on_bare_connection() {
    let mut repo = SqliteLocationRepository::from_connection(Connection::open_in_memory().unwrap());
    assert!(repo.load_all().is_err());

    repo.ensure_schema().unwrap();
    assert!(repo.load_all().unwrap().is_empty());
}

#[test]
fn load_all_skips_rows_with_null_coordinates() {
    let mut repo = SqliteLocationRepository::open_in_memory().unwrap();
    let first = repo.append(&Coordinate::new(1.0, 2.0)).unwrap();
    repo.connection()
        .execute(
            "INSERT INTO locations (latitude, longitude) VALUES (NULL, 1.0);",
            [],
        )
        .unwrap();
    let last = repo.append(&Coordinate::new(3.0, 4.0)).unwrap();

    assert_eq!(repo.load_all().unwrap(), vec![first, last]);
    assert_eq!(repo.count().unwrap(), 3);
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");

    let mut repo = SqliteLocationRepository::open(&path).unwrap();
    let stored: Vec<_> = (0..3)
        .map(|i| repo.append(&Coordinate::new(f64::from(i), -f64::from(i))).unwrap())
        .collect();
    repo.close().unwrap();

    let reopened = SqliteLocationRepository::open(&path).unwrap();
    assert_eq!(reopened.load_all().unwrap(), stored);
}
