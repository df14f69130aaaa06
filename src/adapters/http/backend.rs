//! PHP attendance backend over HTTP
//!
//! Implements the `AttendanceBackend` port trait against the backend's
//! `students.php?action=validate` and `attendance.php?action=add` scripts.
//! Both answer with `{"status": "success" | "error", ...}`; the HTTP status
//! code is not meaningful, so replies are decoded regardless of it.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::BackendConfig;
use crate::core::error::CheckinError;
use crate::core::models::{AttendanceSubmission, StudentRecord};
use crate::core::ports::AttendanceBackend;

const SUCCESS: &str = "success";

/// Reply envelope shared by the backend scripts
#[derive(Debug, Deserialize)]
pub struct BackendReply {
    /// `"success"` or `"error"`
    pub status: String,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Present on a successful validate
    #[serde(default)]
    pub student: Option<StudentRecord>,
}

impl BackendReply {
    fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case(SUCCESS)
    }

    /// Interpret as the answer to a validate request
    pub fn into_student(self) -> Result<StudentRecord, CheckinError> {
        match self.student {
            Some(student) if self.status.eq_ignore_ascii_case(SUCCESS) => Ok(student),
            _ => Err(CheckinError::StudentNotFound(
                self.message.unwrap_or_else(|| "Student not found".to_string()),
            )),
        }
    }

    /// Interpret as the answer to an add request
    pub fn into_confirmation(self) -> Result<String, CheckinError> {
        if self.is_success() {
            Ok(self.message.unwrap_or_else(|| "Attendance submitted successfully".to_string()))
        } else {
            Err(CheckinError::Network(
                self.message.unwrap_or_else(|| "Failed to submit attendance".to_string()),
            ))
        }
    }
}

/// Backend client
#[derive(Debug, Clone)]
pub struct PhpBackend {
    client: Client,
    students_url: Url,
    attendance_url: Url,
}

impl PhpBackend {
    /// Create a client for the configured backend
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("rollcall/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            students_url: script_url(&config.base_url, &config.students_path)?,
            attendance_url: script_url(&config.base_url, &config.attendance_path)?,
        })
    }

    fn fetch(&self, request: reqwest::blocking::RequestBuilder) -> Result<BackendReply, CheckinError> {
        let response = request.send().map_err(|e| {
            log::warn!("backend request failed: {e}");
            CheckinError::server_error()
        })?;

        let status = response.status();
        response.json::<BackendReply>().map_err(|e| {
            log::warn!("unreadable backend reply (HTTP {status}): {e}");
            CheckinError::server_error()
        })
    }
}

impl AttendanceBackend for PhpBackend {
    fn validate_student(&self, student_id: &str) -> Result<StudentRecord, CheckinError> {
        let mut url = self.students_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "validate")
            .append_pair("student_id", student_id);

        log::debug!("GET {url}");
        self.fetch(self.client.get(url))?.into_student()
    }

    fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<String, CheckinError> {
        let mut url = self.attendance_url.clone();
        url.query_pairs_mut().append_pair("action", "add");

        log::debug!("POST {url} for student {}", submission.student_id);
        self.fetch(self.client.post(url).json(submission))?.into_confirmation()
    }
}

fn script_url(base: &str, script: &str) -> anyhow::Result<Url> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), script.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| anyhow::anyhow!("Invalid backend URL {joined:?}: {e}"))
}
