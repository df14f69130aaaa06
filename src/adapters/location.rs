//! Geolocation from supplied coordinates
//!
//! On a terminal there is no location service; the operator passes the
//! device position explicitly. No coordinates means no consent.

use crate::core::models::GeoCoordinate;
use crate::core::ports::{Geolocator, LocationError};

/// Geolocator that reports a fixed position, or a denial when there is none
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    position: Option<GeoCoordinate>,
}

impl FixedGeolocator {
    /// Report `position`
    #[must_use]
    pub const fn at(position: GeoCoordinate) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Report a permission denial
    #[must_use]
    pub const fn denied() -> Self {
        Self { position: None }
    }

    /// From optional CLI latitude/longitude; both or neither
    pub fn from_args(latitude: Option<f64>, longitude: Option<f64>) -> anyhow::Result<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Ok(Self::at(GeoCoordinate::new(lat, lon)?)),
            (None, None) => Ok(Self::denied()),
            _ => anyhow::bail!("--lat and --lon must be given together"),
        }
    }
}

impl Geolocator for FixedGeolocator {
    fn current_position(&self) -> Result<GeoCoordinate, LocationError> {
        self.position.ok_or(LocationError::PermissionDenied)
    }
}
