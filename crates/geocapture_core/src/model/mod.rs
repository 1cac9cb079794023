//! Domain model for captured locations.
//!
//! # Responsibility
//! - Define the coordinate value produced by location providers.
//! - Define the persisted record shape owned by the repository layer.
//!
//! # Invariants
//! - Records are immutable once stored; ids are assigned by storage.

pub mod location;
