//! Geographic coordinates
//!
//! WGS-84 latitude/longitude pairs as reported by a device or configured
//! for the allowed check-in site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude outside `[-90, 90]` or not finite
    #[error("invalid latitude: {0}")]
    Latitude(f64),

    /// Longitude outside `[-180, 180]` or not finite
    #[error("invalid longitude: {0}")]
    Longitude(f64),
}

/// A position in WGS-84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,

    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Check that a deserialized coordinate is in range
    pub fn validated(self) -> Result<Self, CoordinateError> {
        Self::new(self.latitude, self.longitude)
    }
}

impl std::fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}
