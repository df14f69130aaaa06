//! Geofence distance and admission tests

use rollcall::core::models::GeoCoordinate;
use rollcall::core::services::{
    DEFAULT_RADIUS_METERS, DEFAULT_SITE, Geofence, distance_meters, is_within_fence,
};

use crate::common::north_of_site;

#[test]
fn test_site_to_itself_is_zero() {
    assert!(distance_meters(DEFAULT_SITE, DEFAULT_SITE).abs() < f64::EPSILON);
    assert!(is_within_fence(DEFAULT_SITE, DEFAULT_SITE, DEFAULT_RADIUS_METERS));
}

#[test]
fn test_hundredth_of_a_degree_north_is_outside() {
    let point = GeoCoordinate::new(-34.915711, 138.600064).unwrap();
    let distance = distance_meters(point, DEFAULT_SITE);
    assert!((distance - 1_111.95).abs() < 1.0, "got {distance}");
    assert!(!is_within_fence(point, DEFAULT_SITE, DEFAULT_RADIUS_METERS));
}

#[test]
fn test_nearby_point_is_inside() {
    let fence = Geofence::default();
    let decision = fence.evaluate(north_of_site(500.0));
    assert!(decision.admitted);
    assert!((decision.distance_meters - 500.0).abs() < 0.01);
}

#[test]
fn test_boundary_neighbourhood() {
    let fence = Geofence::default();
    assert!(fence.admits(north_of_site(999.9)));
    assert!(!fence.admits(north_of_site(1_000.1)));
}

#[test]
fn test_zero_radius_admits_only_the_site() {
    let fence = Geofence::new(DEFAULT_SITE, 0.0);
    assert!(fence.admits(DEFAULT_SITE));
    assert!(!fence.admits(north_of_site(0.5)));
}

#[test]
fn test_known_city_distance() {
    // Adelaide to Melbourne, roughly 654 km on the haversine sphere
    let melbourne = GeoCoordinate::new(-37.8136, 144.9631).unwrap();
    let km = distance_meters(DEFAULT_SITE, melbourne) / 1000.0;
    assert!((640.0..670.0).contains(&km), "got {km}");
}

#[test]
fn test_coordinate_validation() {
    assert!(GeoCoordinate::new(-90.0, 180.0).is_ok());
    assert!(GeoCoordinate::new(90.1, 0.0).is_err());
    assert!(GeoCoordinate::new(0.0, -180.5).is_err());
    assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
}
