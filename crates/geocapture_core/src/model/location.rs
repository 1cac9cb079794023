//! Location domain model.
//!
//! # Responsibility
//! - Define `Coordinate` (an unsaved reading) and `LocationRecord` (a stored one).
//! - Provide list display helpers shared by the FFI and CLI shells.
//!
//! # Invariants
//! - `LocationRecord::id` is assigned by storage, unique and increasing.
//! - Coordinates must be finite; no latitude/longitude range check is applied.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier of a captured location.
pub type LocationId = i64;

/// One latitude/longitude reading that has not been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validates that both components are finite numbers.
    ///
    /// SQLite stores `NaN` as `NULL`, which would break read-back, so
    /// non-finite values are rejected before they reach storage.
    pub fn validate(&self) -> Result<(), CoordinateValidationError> {
        if !self.latitude.is_finite() {
            return Err(CoordinateValidationError::NonFiniteLatitude(self.latitude));
        }
        if !self.longitude.is_finite() {
            return Err(CoordinateValidationError::NonFiniteLongitude(
                self.longitude,
            ));
        }
        Ok(())
    }
}

/// Validation failures for coordinate values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateValidationError {
    NonFiniteLatitude(f64),
    NonFiniteLongitude(f64),
}

impl Display for CoordinateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteLatitude(value) => write!(f, "latitude must be finite, got {value}"),
            Self::NonFiniteLongitude(value) => {
                write!(f, "longitude must be finite, got {value}")
            }
        }
    }
}

impl Error for CoordinateValidationError {}

/// A persisted location capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    /// Returns the coordinate part of this record.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// List title, e.g. `Localização 3`.
    pub fn display_title(&self) -> String {
        format!("Localização {}", self.id)
    }

    /// List subtitle, e.g. `Latitude: 10.5 | Longitude: -20.25`.
    pub fn display_description(&self) -> String {
        format!(
            "Latitude: {} | Longitude: {}",
            self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, CoordinateValidationError, LocationRecord};

    #[test]
    fn validate_accepts_out_of_range_but_finite_values() {
        assert!(Coordinate::new(123.0, -500.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_nan_and_infinity() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 0.0).validate(),
            Err(CoordinateValidationError::NonFiniteLatitude(_))
        ));
        assert!(matches!(
            Coordinate::new(0.0, f64::INFINITY).validate(),
            Err(CoordinateValidationError::NonFiniteLongitude(_))
        ));
    }

    #[test]
    fn display_helpers_match_list_rendering() {
        let record = LocationRecord {
            id: 7,
            latitude: 10.5,
            longitude: -20.25,
        };
        assert_eq!(record.display_title(), "Localização 7");
        assert_eq!(
            record.display_description(),
            "Latitude: 10.5 | Longitude: -20.25"
        );
    }

    #[test]
    fn record_serializes_with_plain_field_names() {
        let record = LocationRecord {
            id: 1,
            latitude: 1.5,
            longitude: 2.5,
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        assert_eq!(json, r#"{"id":1,"latitude":1.5,"longitude":2.5}"#);
    }
}
