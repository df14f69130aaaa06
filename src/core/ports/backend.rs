//! Attendance backend port
//!
//! Defines the interface to the external backend that owns students,
//! courses and attendance records.

use crate::core::error::CheckinError;
use crate::core::models::{AttendanceSubmission, StudentRecord};

/// Remote attendance backend
///
/// Implementations map transport failures and non-success responses to
/// [`CheckinError::Network`], and unknown students to
/// [`CheckinError::StudentNotFound`].
#[cfg_attr(test, mockall::automock)]
pub trait AttendanceBackend: Send + Sync {
    /// Resolve a student ID to the student and their enrolled courses
    fn validate_student(&self, student_id: &str) -> Result<StudentRecord, CheckinError>;

    /// Record an attendance event
    ///
    /// Returns the backend's confirmation message.
    fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<String, CheckinError>;
}
