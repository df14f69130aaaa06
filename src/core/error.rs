//! Check-in error taxonomy
//!
//! Every failure in the check-in flow is recoverable and carries the
//! message shown to the student. Only [`CheckinError::InvalidToken`] ends
//! the session; everything else resets or blocks the form.

use thiserror::Error;

/// Errors surfaced by the check-in flow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckinError {
    /// Token missing, malformed, expired or from the future
    #[error("This QR code has expired or is invalid.")]
    InvalidToken,

    /// Student ID was blank
    #[error("Please enter a student ID")]
    EmptyStudentId,

    /// Backend did not recognise the student ID
    #[error("{0}")]
    StudentNotFound(String),

    /// Transport failure or non-success backend response
    #[error("{0}")]
    Network(String),

    /// Device position unavailable or permission refused
    #[error("Location access denied. Please allow location permission.")]
    LocationDenied,

    /// Device is outside the geofence
    #[error("You are not in the allowed location. Please check in from the designated area.")]
    OutOfFence {
        /// Distance from the allowed site
        distance_meters: f64,
    },

    /// Submission attempted before a course was chosen
    #[error("Please select a course")]
    MissingCourseSelection,

    /// Selected course is not one the student is enrolled in
    #[error("Course {0} is not one of this student's courses")]
    UnknownCourse(String),

    /// A step was requested while the session is in another state
    #[error("A request is already in progress")]
    Busy,
}

impl CheckinError {
    /// Generic message used for transport failures
    pub const SERVER_ERROR: &'static str = "Server error. Please try again later.";

    /// Transport failure with the standard message
    #[must_use]
    pub fn server_error() -> Self {
        Self::Network(Self::SERVER_ERROR.to_string())
    }

    /// Whether the form should reset after showing this error
    #[must_use]
    pub const fn resets_form(&self) -> bool {
        matches!(
            self,
            Self::StudentNotFound(_)
                | Self::Network(_)
                | Self::LocationDenied
                | Self::OutOfFence { .. }
        )
    }

    /// Short machine-readable kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::EmptyStudentId => "empty_student_id",
            Self::StudentNotFound(_) => "student_not_found",
            Self::Network(_) => "network_error",
            Self::LocationDenied => "location_denied",
            Self::OutOfFence { .. } => "out_of_fence",
            Self::MissingCourseSelection => "missing_course_selection",
            Self::UnknownCourse(_) => "unknown_course",
            Self::Busy => "busy",
        }
    }
}
