//! End-to-end check-in against the fake backend

use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fake_backend::FakeBackend;
use super::{HOUR, rollcall, token_aged, write_config};

const SITE_LAT: &str = "-34.925711";
const SITE_LON: &str = "138.600064";

fn backend() -> FakeBackend {
    FakeBackend::start(vec![
        ("1001", "Ada Lovelace", vec![("C1", "Analytical Engines")]),
        (
            "1002",
            "Charles Babbage",
            vec![("C1", "Analytical Engines"), ("C2", "Difference Engines")],
        ),
        ("1003", "Nobody Enrolled", vec![]),
    ])
}

#[test]
fn test_single_course_check_in() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(HOUR), "--student-id", "1001"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attendance submitted successfully"))
        .stdout(predicate::str::contains("Ada Lovelace"));

    let submissions = backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["student_id"], "1001");
    assert_eq!(submissions[0]["course_id"], "C1");
    assert_eq!(submissions[0]["status"], "Present");
    assert_eq!(submissions[0]["location"]["latitude"], -34.925711);
}

#[test]
fn test_multi_course_requires_choice() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(HOUR), "--student-id", "1002"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Please select a course"));
    assert!(backend.submissions().is_empty());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["--json", "checkin", "--token", &token_aged(HOUR), "--student-id", "1002"])
        .args(["--course", "C2", "--status", "late"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"));

    let submissions = backend.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["course_id"], "C2");
    assert_eq!(submissions[0]["status"], "Late");
}

#[test]
fn test_out_of_fence_is_refused() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["--json", "checkin", "--token", &token_aged(HOUR), "--student-id", "1001"])
        .args(["--lat", "-34.915711", "--lon", SITE_LON])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"error\": \"out_of_fence\""));
    assert!(backend.submissions().is_empty());
}

#[test]
fn test_missing_location_is_denied() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(HOUR), "--student-id", "1001"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Location access denied"));
}

#[test]
fn test_unknown_student() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(HOUR), "--student-id", "9999"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Student not found"));
}

#[test]
fn test_expired_token_never_reaches_backend() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(14 * HOUR), "--student-id", "1001"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("This QR code has expired or is invalid."));
    assert!(backend.submissions().is_empty());
}

#[test]
fn test_unreachable_backend() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["checkin", "--token", &token_aged(HOUR), "--student-id", "1001"])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Server error. Please try again later."));
}

#[test]
fn test_kiosk_handles_several_students() {
    let backend = backend();
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), backend.base_url());

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["kiosk", "--token", &token_aged(HOUR)])
        .args(["--lat", SITE_LAT, "--lon", SITE_LON])
        .write_stdin("1001\n1002\n2\n9999\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Difference Engines"))
        .stdout(predicate::str::contains("Student not found"));

    let submissions = backend.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0]["course_id"], "C1");
    assert_eq!(submissions[1]["course_id"], "C2");
}

#[test]
fn test_kiosk_with_expired_token_exits() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["kiosk", "--token", &token_aged(20 * HOUR)])
        .write_stdin("1001\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("expired or is invalid"));
}
