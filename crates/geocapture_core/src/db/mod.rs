//! Storage bootstrap for the locations database.
//!
//! Opening a connection always runs the schema migrations, so a handle
//! returned from here is ready for `locations` reads and writes.
//! Failures name the database they concern (`memory` or the file path) so a
//! bad data directory shows up in the log without extra context.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// SQLite could not open or configure the database.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// A schema migration step failed; nothing from the batch was committed.
    Migration {
        target: String,
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was stamped by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A statement on an already-bootstrapped connection failed.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Short code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open { .. } => "db_open_failed",
            Self::Migration { .. } => "db_migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
            Self::Sqlite(_) => "db_statement_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { target, source } => {
                write!(f, "cannot open locations database `{target}`: {source}")
            }
            Self::Migration {
                target,
                version,
                source,
            } => write!(
                f,
                "migration to schema v{version} failed for `{target}`: {source}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "locations database is at schema v{db_version}; this build reads up to v{latest_supported}"
            ),
            Self::Sqlite(source) => write!(f, "{source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Migration { source, .. } => Some(source),
            Self::Sqlite(source) => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
