//! Built-in `LocationProvider` implementations.

use super::{LocationError, LocationProvider, LocationResult, PermissionStatus};
use crate::model::location::Coordinate;

/// Provider answering with a preconfigured permission and coordinate.
///
/// Used by the CLI (`--lat/--lon`) and by tests.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    permission: PermissionStatus,
    position: Result<Coordinate, String>,
}

impl FixedLocationProvider {
    pub fn granted(coordinate: Coordinate) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Ok(coordinate),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            position: Err("permission denied".to_string()),
        }
    }

    /// Permission granted, but every fix fails with `message`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            permission: PermissionStatus::Granted,
            position: Err(message.into()),
        }
    }

    /// Replaces the coordinate returned by later captures.
    pub fn set_position(&mut self, coordinate: Coordinate) {
        self.position = Ok(coordinate);
    }
}

impl LocationProvider for FixedLocationProvider {
    fn request_foreground_permission(&mut self) -> LocationResult<PermissionStatus> {
        Ok(self.permission)
    }

    fn current_position(&mut self) -> LocationResult<Coordinate> {
        self.position.clone().map_err(LocationError::Unavailable)
    }
}

/// What the mobile shell observed from the platform for one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformReport {
    pub permission: PermissionStatus,
    /// The fix, or the platform error text when no fix was produced.
    pub position: Result<Coordinate, String>,
}

/// Provider fed by the FFI shell: the Dart side runs the platform prompt and
/// geolocation call, then stages the outcome here before a capture.
///
/// A staged report is consumed by the capture that reads it. Capturing with
/// nothing staged fails the permission stage.
#[derive(Debug, Default)]
pub struct ReportedLocationProvider {
    pending: Option<PlatformReport>,
}

impl ReportedLocationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages the report for the next capture, replacing any unused one.
    pub fn stage(&mut self, report: PlatformReport) {
        self.pending = Some(report);
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl LocationProvider for ReportedLocationProvider {
    fn request_foreground_permission(&mut self) -> LocationResult<PermissionStatus> {
        match self.pending.as_ref() {
            Some(report) if report.permission.is_granted() => Ok(PermissionStatus::Granted),
            Some(_) => {
                self.pending = None;
                Ok(PermissionStatus::Denied)
            }
            None => Err(LocationError::PermissionRequestFailed(
                "no platform report staged".to_string(),
            )),
        }
    }

    fn current_position(&mut self) -> LocationResult<Coordinate> {
        match self.pending.take() {
            Some(report) => report.position.map_err(LocationError::Unavailable),
            None => Err(LocationError::Unavailable(
                "no platform report staged".to_string(),
            )),
        }
    }
}
