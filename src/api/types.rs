//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;
use crate::core::models::{AttendanceStatus, GeoCoordinate};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for `POST /checkin`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinBody {
    /// Token from the QR link
    #[serde(default)]
    pub token: Option<String>,
    /// Student ID as typed
    pub student_id: String,
    /// Chosen course
    #[serde(default)]
    pub course_id: Option<String>,
    /// Attendance status, `Present` when omitted
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
    /// Device position; absent when the browser refused
    #[serde(default)]
    pub location: Option<GeoCoordinate>,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Site endpoint response data
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SiteData {
    /// Allowed site
    pub site: GeoCoordinate,
    /// Admission radius in meters
    pub radius_meters: f64,
    /// Token validity in hours
    pub token_validity_hours: u64,
}
