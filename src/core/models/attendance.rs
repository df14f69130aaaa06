//! Attendance submission model
//!
//! What the check-in flow sends to the backend once a student is admitted.

use serde::{Deserialize, Serialize};

use super::GeoCoordinate;

/// Attendance status recorded with a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Checked in on site
    #[default]
    Present,
    /// Checked in after the session started
    Late,
    /// Marked absent by an administrator
    Absent,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => write!(f, "Present"),
            Self::Late => write!(f, "Late"),
            Self::Absent => write!(f, "Absent"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "late" => Ok(Self::Late),
            "absent" => Ok(Self::Absent),
            _ => Err(format!("Invalid status: {s}. Use: present, late, absent")),
        }
    }
}

/// An attendance event ready to be recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSubmission {
    /// Student being checked in
    pub student_id: String,

    /// Course the attendance is for
    pub course_id: String,

    /// Recorded status
    pub status: AttendanceStatus,

    /// Device position at check-in time
    pub location: GeoCoordinate,
}
