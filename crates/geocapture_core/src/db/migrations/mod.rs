//! Versioned schema for the locations database.
//!
//! `PRAGMA user_version` records the last applied step. Databases written by
//! the mobile app before versioning existed report `0` but already hold the
//! `locations` table, so every step must be written to replay cleanly over it.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// One schema step: stamp `version` after running `sql`.
struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_locations.sql"),
}];

/// What one `apply_migrations` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
}

impl MigrationReport {
    /// Number of schema steps run by this call.
    pub fn applied(&self) -> u32 {
        self.to_version - self.from_version
    }
}

/// Highest schema version this build can create and read.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to `latest_version()` inside one transaction.
///
/// `target` names the database in errors (`memory` or a file path).
pub fn apply_migrations(conn: &mut Connection, target: &str) -> DbResult<MigrationReport> {
    let from_version = current_user_version(conn)?;
    let to_version = latest_version();

    if from_version > to_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: to_version,
        });
    }

    let report = MigrationReport {
        from_version,
        to_version,
    };
    if report.applied() == 0 {
        return Ok(report);
    }

    let tx = conn.transaction()?;
    for step in SCHEMA_STEPS.iter().filter(|step| step.version > from_version) {
        let stamp = format!("PRAGMA user_version = {};", step.version);
        tx.execute_batch(step.sql)
            .and_then(|()| tx.execute_batch(&stamp))
            .map_err(|source| DbError::Migration {
                target: target.to_string(),
                version: step.version,
                source,
            })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok target={} from_version={} to_version={}",
        target, from_version, to_version
    );
    Ok(report)
}

/// Reads the schema version stamped on the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, SCHEMA_STEPS};
    use rusqlite::Connection;

    #[test]
    fn schema_steps_are_strictly_increasing_from_one() {
        let versions: Vec<u32> = SCHEMA_STEPS.iter().map(|step| step.version).collect();
        let expected: Vec<u32> = (1..=latest_version()).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn second_apply_reports_nothing_to_do() {
        let mut conn = Connection::open_in_memory().unwrap();

        let first = apply_migrations(&mut conn, "memory").unwrap();
        assert_eq!(first.from_version, 0);
        assert_eq!(first.applied(), latest_version());

        let second = apply_migrations(&mut conn, "memory").unwrap();
        assert_eq!(second.applied(), 0);
    }
}
