//! Integration tests for the rollcall CLI
//!
//! These tests run the real binary against a fake PHP backend, covering the
//! full cycle of: issue token → check token → check in.

#[path = "../common/mod.rs"]
mod common;

mod checkin_test;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

use rollcall::core::models::CheckinToken;

const HOUR: i64 = 60 * 60 * 1000;

/// Helper function to create a rollcall command
fn rollcall() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("rollcall"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Current time in epoch milliseconds
fn now_millis() -> i64 {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
    i64::try_from(elapsed.as_millis()).unwrap()
}

/// A token issued `age` milliseconds ago
fn token_aged(age: i64) -> String {
    CheckinToken::issue(now_millis() - age).encode()
}

/// Write a config pointing at `backend_url` with geocoding off and no reset pause
fn write_config(dir: &Path, backend_url: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(
        &path,
        format!(
            r#"
[backend]
base_url = "{backend_url}"
timeout_secs = 5

[portal]
origin = "https://attend.example.edu"
reset_delay_ms = 0

[geocoding]
enabled = false
"#
        ),
    )
    .unwrap();
    path
}

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_version() {
    rollcall()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rollcall v"));
}

#[test]
fn test_version_json() {
    rollcall()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_help_lists_commands() {
    rollcall()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("token"))
        .stdout(predicate::str::contains("checkin"))
        .stdout(predicate::str::contains("kiosk"));
}

// =============================================================================
// TOKENS
// =============================================================================

#[test]
fn test_issue_then_check() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");
    let issued_at = 1_760_000_000_000_i64;

    let output = rollcall()
        .args(["--json", "--config"])
        .arg(&config)
        .args(["token", "issue", "--at", &issued_at.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let issued: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let url = issued["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://attend.example.edu/student?token="));

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["token", "check", &url, "--now", &(issued_at + HOUR).to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Token is valid"));

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["token", "check", &url, "--now", &(issued_at + 14 * HOUR).to_string()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Token has expired"));
}

#[test]
fn test_check_garbage_token() {
    let dir = TempDir::new().unwrap();
    rollcall()
        .env("ROLLCALL_CONFIG_DIR", dir.path())
        .args(["--json", "token", "check", "not-a-token"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"malformed\""));
}

#[test]
fn test_shorter_validity_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[token]\nvalidity_hours = 1\n").unwrap();

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["token", "check", &token_aged(2 * HOUR)])
        .assert()
        .code(1);
}

// =============================================================================
// DISTANCE
// =============================================================================

#[test]
fn test_distance_inside_and_outside() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["distance", "--lat", "-34.925711", "--lon", "138.600064"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inside the allowed area"));

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["--json", "distance", "--lat", "-34.915711", "--lon", "138.600064"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"admitted\": false"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_path_honours_env() {
    let dir = TempDir::new().unwrap();
    rollcall()
        .env("ROLLCALL_CONFIG_DIR", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_reflects_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://backend.test/api");

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://backend.test/api"))
        .stdout(predicate::str::contains("radius_meters = 1000"));
}

#[test]
fn test_malformed_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[site\n").unwrap();

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["distance", "--lat", "0", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_oversized_token_validity_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[token]\nvalidity_hours = 9223372036854775807\n").unwrap();

    rollcall()
        .arg("--config")
        .arg(&config)
        .args(["token", "check", &token_aged(HOUR)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid [token] validity_hours"));
}
