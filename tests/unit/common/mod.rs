//! Shared test fixtures and helpers
//!
//! - `mocks.rs` - Hand-written implementations of the port traits


use rollcall::core::models::{CheckinToken, Course, GeoCoordinate, StudentRecord};
use rollcall::core::services::DEFAULT_SITE;

/// A fixed "now" used across tests
pub const NOW: i64 = 1_760_000_000_000;

/// One hour in milliseconds
pub const HOUR: i64 = 60 * 60 * 1000;

/// Encoded token issued `age_millis` before [`NOW`]
pub fn token_aged(age_millis: i64) -> String {
    CheckinToken::issue(NOW - age_millis).encode()
}

/// A student enrolled in the given course IDs
pub fn student(id: &str, courses: &[&str]) -> StudentRecord {
    StudentRecord {
        student_id: id.to_string(),
        student_name: format!("Student {id}"),
        courses: courses
            .iter()
            .map(|c| Course {
                course_id: (*c).to_string(),
                course_name: format!("Course {c}"),
            })
            .collect(),
    }
}

/// A point `meters` due north of the default site
pub fn north_of_site(meters: f64) -> GeoCoordinate {
    // One degree of latitude is R * pi / 180 meters on the haversine sphere.
    let degrees = meters / (6_371_000.0 * std::f64::consts::PI / 180.0);
    GeoCoordinate::new(DEFAULT_SITE.latitude + degrees, DEFAULT_SITE.longitude).unwrap()
}
