//! Kiosk driver tests against hand-written port mocks

use rollcall::core::CheckinError;
use rollcall::core::models::LocationDetails;
use rollcall::core::services::{CheckinSession, DEFAULT_SITE, Geofence, TokenPolicy};
use rollcall::kiosk::{CheckinRequest, Kiosk};

use crate::common::mocks::{MockBackend, MockGeocoder, MockGeolocator};
use crate::common::{HOUR, NOW, north_of_site, student, token_aged};

fn session() -> CheckinSession {
    CheckinSession::open(Some(&token_aged(HOUR)), NOW, &TokenPolicy::default())
}

fn request(student_id: &str, course_id: Option<&str>) -> CheckinRequest {
    CheckinRequest {
        student_id: student_id.to_string(),
        course_id: course_id.map(str::to_string),
    }
}

#[test]
fn test_check_in_records_submission() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let receipt = kiosk.check_in(&mut session(), &request("S1", None)).unwrap();

    assert_eq!(receipt.student.student_id, "S1");
    assert_eq!(receipt.course.course_name, "Course C1");
    let submissions = backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].location, DEFAULT_SITE);
}

#[test]
fn test_student_id_is_trimmed() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    assert!(kiosk.check_in(&mut session(), &request("  S1 ", None)).is_ok());
}

#[test]
fn test_unknown_student_never_locates() {
    let backend = MockBackend::new();
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let err = kiosk.check_in(&mut session(), &request("S404", None)).unwrap_err();
    assert_eq!(err, CheckinError::StudentNotFound("Student not found".to_string()));
    assert_eq!(geolocator.calls(), 0);
}

#[test]
fn test_multi_course_student_needs_choice() {
    let backend = MockBackend::new().with_student(student("S1", &["C1", "C2"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let mut session = session();
    let err = kiosk.check_in(&mut session, &request("S1", None)).unwrap_err();
    assert_eq!(err, CheckinError::MissingCourseSelection);
    assert_eq!(geolocator.calls(), 0);

    // The session is still waiting for a course
    let receipt = kiosk.complete(&mut session, Some("C2")).unwrap();
    assert_eq!(receipt.course.course_id, "C2");
    assert_eq!(backend.lookups(), 1);
}

#[test]
fn test_out_of_fence_is_not_submitted() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(north_of_site(1_200.0));
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let err = kiosk.check_in(&mut session(), &request("S1", None)).unwrap_err();
    assert!(matches!(err, CheckinError::OutOfFence { .. }));
    assert!(backend.submissions().is_empty());
}

#[test]
fn test_denied_location() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::denied();
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let err = kiosk.check_in(&mut session(), &request("S1", None)).unwrap_err();
    assert_eq!(err, CheckinError::LocationDenied);
    assert!(backend.submissions().is_empty());
}

#[test]
fn test_wider_fence_admits() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(north_of_site(1_200.0));
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::new(DEFAULT_SITE, 2_000.0));

    let receipt = kiosk.check_in(&mut session(), &request("S1", None)).unwrap();
    assert!((receipt.distance_meters - 1_200.0).abs() < 0.01);
}

#[test]
fn test_geocoder_details_are_attached() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let details = LocationDetails {
        display_name: "King William St, Adelaide SA 5000".to_string(),
        street: "King William St".to_string(),
        suburb: "Adelaide".to_string(),
    };
    let geocoder = MockGeocoder::returning(details.clone());
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default()).with_geocoder(&geocoder);

    let receipt = kiosk.check_in(&mut session(), &request("S1", None)).unwrap();
    assert_eq!(receipt.location, Some(details));
}

#[test]
fn test_geocoder_failure_falls_back() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let geocoder = MockGeocoder::failing();
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default()).with_geocoder(&geocoder);

    let receipt = kiosk.check_in(&mut session(), &request("S1", None)).unwrap();
    assert_eq!(receipt.location, Some(LocationDetails::unknown()));
}

#[test]
fn test_failed_submission_then_reset_allows_next_student() {
    let backend = MockBackend::new()
        .with_student(student("S1", &["C1"]))
        .failing_submissions(CheckinError::server_error());
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let mut session = session();
    let err = kiosk.check_in(&mut session, &request("S1", None)).unwrap_err();
    assert_eq!(err.to_string(), "Server error. Please try again later.");

    session.reset();
    assert!(kiosk.lookup_student(&mut session, "S1").is_ok());
}

#[test]
fn test_rejected_token_blocks_everything() {
    let backend = MockBackend::new().with_student(student("S1", &["C1"]));
    let geolocator = MockGeolocator::at(DEFAULT_SITE);
    let kiosk = Kiosk::new(&backend, &geolocator, Geofence::default());

    let mut session = CheckinSession::open(None, NOW, &TokenPolicy::default());
    let err = kiosk.check_in(&mut session, &request("S1", None)).unwrap_err();
    assert_eq!(err, CheckinError::InvalidToken);
    assert_eq!(backend.lookups(), 0);
}
