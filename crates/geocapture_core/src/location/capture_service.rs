//! Location capture service.
//!
//! # Responsibility
//! - Resolve permission and read one fix through a `LocationProvider`.
//! - Reject non-finite fixes before they reach persistence.
//! - Emit stage-level diagnostics.

use super::{LocationError, LocationProvider, LocationResult, PermissionStatus};
use crate::model::location::Coordinate;
use log::{info, warn};
use std::time::Instant;

/// Service wrapper over a platform location provider.
pub struct CaptureService<P: LocationProvider> {
    provider: P,
}

impl<P: LocationProvider> CaptureService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Resolves foreground permission.
    pub fn request_permission(&mut self) -> LocationResult<PermissionStatus> {
        match self.provider.request_foreground_permission() {
            Ok(status) => {
                info!(
                    "event=location_permission module=location status=ok permission={:?}",
                    status
                );
                Ok(status)
            }
            Err(err) => {
                warn!(
                    "event=location_permission module=location status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Reads one fix from the provider.
    ///
    /// # Errors
    /// - `LocationError::Unavailable` when the provider fails or returns
    ///   non-finite components.
    pub fn current_coordinate(&mut self) -> LocationResult<Coordinate> {
        let started_at = Instant::now();
        let coordinate = self
            .provider
            .current_position()
            .and_then(|coordinate| match coordinate.validate() {
                Ok(()) => Ok(coordinate),
                Err(err) => Err(LocationError::Unavailable(err.to_string())),
            });

        match &coordinate {
            Ok(_) => info!(
                "event=location_fix module=location status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=location_fix module=location status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::CaptureService;
    use crate::location::{FixedLocationProvider, LocationError};
    use crate::model::location::Coordinate;

    #[test]
    fn non_finite_fix_is_reported_unavailable() {
        let mut service =
            CaptureService::new(FixedLocationProvider::granted(Coordinate::new(f64::NAN, 1.0)));
        assert!(matches!(
            service.current_coordinate(),
            Err(LocationError::Unavailable(_))
        ));
    }
}
