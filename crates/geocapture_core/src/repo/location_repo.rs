//! Location repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Own the SQLite connection holding the `locations` table.
//! - Provide schema bootstrap, append and full-list APIs.
//!
//! # Invariants
//! - `load_all` returns every row ordered by `id ASC` (insertion order).
//! - Rows with a NULL coordinate are skipped by `load_all` and logged with
//!   their id; `count` still includes them.
//! - There is no pagination; cost grows linearly with stored rows.

use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::location::{
    Coordinate, CoordinateValidationError, LocationId, LocationRecord,
};
use log::{debug, error, info, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const LOCATION_SELECT_SQL: &str = "SELECT id, latitude, longitude FROM locations";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for location persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CoordinateValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted location data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<CoordinateValidationError> for RepoError {
    fn from(value: CoordinateValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for captured locations.
pub trait LocationRepository {
    /// Creates the `locations` table when absent. Idempotent.
    fn ensure_schema(&mut self) -> RepoResult<()>;
    /// Appends one coordinate and returns the stored record.
    fn append(&mut self, coordinate: &Coordinate) -> RepoResult<LocationRecord>;
    /// Returns every stored record in insertion order.
    fn load_all(&self) -> RepoResult<Vec<LocationRecord>>;
    /// Returns the number of stored records.
    fn count(&self) -> RepoResult<u64>;
    /// Releases the storage handle.
    fn close(self) -> RepoResult<()>
    where
        Self: Sized;
}

/// SQLite-backed location repository owning its connection.
pub struct SqliteLocationRepository {
    conn: Connection,
}

impl SqliteLocationRepository {
    /// Opens (or creates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-open connection. Schema is not touched until
    /// `ensure_schema` is called.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow of the underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn ensure_schema(&mut self) -> RepoResult<()> {
        let report = apply_migrations(&mut self.conn, "repository")?;
        debug!(
            "event=ensure_schema module=repo status=ok schema_version={} migrations_applied={}",
            report.to_version,
            report.applied()
        );
        Ok(())
    }

    fn append(&mut self, coordinate: &Coordinate) -> RepoResult<LocationRecord> {
        coordinate.validate()?;

        self.conn.execute(
            "INSERT INTO locations (latitude, longitude) VALUES (?1, ?2);",
            params![coordinate.latitude, coordinate.longitude],
        )?;
        let id: LocationId = self.conn.last_insert_rowid();

        debug!("event=location_append module=repo status=ok id={}", id);
        Ok(LocationRecord {
            id,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }

    fn load_all(&self) -> RepoResult<Vec<LocationRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{LOCATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        let mut skipped = 0usize;

        while let Some(row) = rows.next()? {
            match parse_location_row(row)? {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!(
            "event=location_load module=repo status=ok count={} skipped={}",
            records.len(),
            skipped
        );
        Ok(records)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM locations;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn close(self) -> RepoResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=repo status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                error!(
                    "event=db_close module=repo status=error error_code=db_close_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Returns `None` for a row missing either coordinate.
fn parse_location_row(row: &Row<'_>) -> RepoResult<Option<LocationRecord>> {
    let id: LocationId = row.get("id")?;
    let latitude: Option<f64> = row.get("latitude")?;
    let longitude: Option<f64> = row.get("longitude")?;

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(LocationRecord {
            id,
            latitude,
            longitude,
        })),
        _ => {
            warn!(
                "event=location_load module=repo status=skip id={} reason=null_coordinate",
                id
            );
            Ok(None)
        }
    }
}
