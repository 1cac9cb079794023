//! Location capture: provider seam and capture service.
//!
//! # Responsibility
//! - Define the permission/position contract platform shells implement.
//! - Wrap providers with validation and stage logging.
//!
//! # Invariants
//! - Permission is always resolved before a position is requested.
//! - No timeout, retry, or accuracy negotiation is applied here.

mod capture_service;
mod providers;

pub use capture_service::CaptureService;
pub use providers::{FixedLocationProvider, PlatformReport, ReportedLocationProvider};

use crate::model::location::Coordinate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LocationResult<T> = Result<T, LocationError>;

/// Resolved foreground location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Failures reported by a location provider.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The permission prompt itself failed (not a denial).
    PermissionRequestFailed(String),
    /// The platform could not produce a usable fix.
    Unavailable(String),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionRequestFailed(message) => {
                write!(f, "permission request failed: {message}")
            }
            Self::Unavailable(message) => write!(f, "location unavailable: {message}"),
        }
    }
}

impl Error for LocationError {}

/// Platform permission and geolocation collaborator.
pub trait LocationProvider {
    /// Prompts for foreground permission if undecided and returns the outcome.
    fn request_foreground_permission(&mut self) -> LocationResult<PermissionStatus>;
    /// Blocks until the device produces one fix or reports a failure.
    fn current_position(&mut self) -> LocationResult<Coordinate>;
}

impl<P: LocationProvider + ?Sized> LocationProvider for Box<P> {
    fn request_foreground_permission(&mut self) -> LocationResult<PermissionStatus> {
        (**self).request_foreground_permission()
    }

    fn current_position(&mut self) -> LocationResult<Coordinate> {
        (**self).current_position()
    }
}
