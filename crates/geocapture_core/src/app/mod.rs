//! Application controller and its error policy.
//!
//! # Responsibility
//! - Orchestrate preferences, location capture and the location repository.
//! - Hold transient UI state: loading flag, record list, active theme.
//!
//! # Invariants
//! - The in-memory list equals the persisted set after every successful load.
//! - The loading flag is cleared on every capture exit path.
//! - Every failure is logged and returned with a user-facing alert.

mod controller;
mod error;

pub use controller::{AppController, AppSnapshot};
pub use error::{Alert, ControllerError, ControllerResult};
