//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from controller orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Coordinate::validate()` before persistence.
//! - The `locations` table is append-only; no update or delete path exists.

pub mod location_repo;
