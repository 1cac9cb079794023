//! Connection bootstrap for the locations database.
//!
//! # Invariants
//! - Returned connections have every schema step applied.
//! - Each open emits one `db_open` start event and one ok/error event.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const MEMORY_TARGET: &str = "memory";

/// Opens the locations database file and applies all pending migrations.
///
/// Parent directories are not created here; callers resolve them through
/// `AppConfig::ensure_dirs`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(&path.display().to_string(), "file", || Connection::open(path))
}

/// Opens an in-memory database and applies all pending migrations.
///
/// Contents vanish when the connection is dropped; used by tests and
/// ephemeral sessions.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(MEMORY_TARGET, "memory", Connection::open_in_memory)
}

fn open_with(
    target: &str,
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect()
        .and_then(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(conn)
        })
        .map_err(|source| DbError::Open {
            target: target.to_string(),
            source,
        })
        .and_then(|mut conn| match apply_migrations(&mut conn, target) {
            Ok(_) => Ok(conn),
            // SQLite defers some open failures to the first statement.
            Err(DbError::Sqlite(source)) => Err(DbError::Open {
                target: target.to_string(),
                source,
            }),
            Err(err) => Err(err),
        });

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.code(),
            err
        ),
    }
    result
}
