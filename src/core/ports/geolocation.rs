//! Device geolocation port
//!
//! Defines the interface for obtaining the check-in device's position.

use thiserror::Error;

use crate::core::models::{CoordinateError, GeoCoordinate, LocationDetails};

/// Reasons a position could not be obtained
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LocationError {
    /// The user refused location access
    #[error("location permission denied")]
    PermissionDenied,

    /// The device reported an impossible position
    #[error(transparent)]
    InvalidPosition(#[from] CoordinateError),
}

/// Source of the device position
#[cfg_attr(test, mockall::automock)]
pub trait Geolocator: Send + Sync {
    /// Current position, with the user's consent
    fn current_position(&self) -> Result<GeoCoordinate, LocationError>;
}

/// Best-effort address lookup for display
#[cfg_attr(test, mockall::automock)]
pub trait ReverseGeocoder: Send + Sync {
    /// Address details near `position`
    fn lookup(&self, position: GeoCoordinate) -> anyhow::Result<LocationDetails>;
}
