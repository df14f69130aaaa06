//! Geofence admission
//!
//! Haversine great-circle distance between two WGS-84 points and the
//! admission rule for the allowed check-in site.

use serde::Serialize;

use crate::core::models::GeoCoordinate;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default allowed site
pub const DEFAULT_SITE: GeoCoordinate = GeoCoordinate {
    latitude: -34.925_711,
    longitude: 138.600_064,
};

/// Default admission radius around the site
pub const DEFAULT_RADIUS_METERS: f64 = 1000.0;

/// Great-circle distance in meters between two points
#[must_use]
pub fn distance_meters(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Whether `point` lies within `radius_meters` of `site` (boundary inclusive)
#[must_use]
pub fn is_within_fence(point: GeoCoordinate, site: GeoCoordinate, radius_meters: f64) -> bool {
    distance_meters(point, site) <= radius_meters
}

/// Result of evaluating a point against a fence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FenceDecision {
    /// Distance from the site
    pub distance_meters: f64,
    /// Whether the point is admitted
    pub admitted: bool,
}

/// An allowed site and its admission radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geofence {
    /// Center of the allowed area
    pub site: GeoCoordinate,
    /// Admission radius
    pub radius_meters: f64,
}

impl Default for Geofence {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }
}

impl Geofence {
    /// Create a fence around `site`
    #[must_use]
    pub const fn new(site: GeoCoordinate, radius_meters: f64) -> Self {
        Self {
            site,
            radius_meters,
        }
    }

    /// Distance and admission for `point`
    #[must_use]
    pub fn evaluate(&self, point: GeoCoordinate) -> FenceDecision {
        let distance_meters = distance_meters(point, self.site);
        FenceDecision {
            distance_meters,
            admitted: distance_meters <= self.radius_meters,
        }
    }

    /// Whether `point` is admitted
    #[must_use]
    pub fn admits(&self, point: GeoCoordinate) -> bool {
        self.evaluate(point).admitted
    }
}
