//! API error types with HTTP status code mapping

use serde::Serialize;

use crate::core::error::CheckinError;

/// Error codes that map to HTTP status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid request (400)
    BadRequest,
    /// Token rejected or device outside the fence (403)
    Forbidden,
    /// Resource not found (404)
    NotFound,
    /// Request understood but cannot proceed yet (422)
    Unprocessable,
    /// Attendance backend failed (502)
    BadGateway,
    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Unprocessable => 422,
            Self::BadGateway => 502,
            Self::Internal => 500,
        }
    }

    /// Get the error code string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Unprocessable => "UNPROCESSABLE",
            Self::BadGateway => "BAD_GATEWAY",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// API error with code and message
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error code (determines HTTP status)
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::BadRequest, message)
    }

    /// Create a forbidden error
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Forbidden, message)
    }

    /// Create a not found error
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::NotFound, message)
    }

    /// Create an unprocessable error
    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Unprocessable, message)
    }

    /// Create a bad gateway error
    #[must_use]
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::BadGateway, message)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Internal, message)
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.code.status_code()
    }
}

impl From<CheckinError> for ApiError {
    fn from(err: CheckinError) -> Self {
        let message = err.to_string();
        match err {
            CheckinError::InvalidToken | CheckinError::OutOfFence { .. } => Self::forbidden(message),
            CheckinError::EmptyStudentId => Self::bad_request(message),
            CheckinError::StudentNotFound(_) => Self::not_found(message),
            CheckinError::Network(_) => Self::bad_gateway(message),
            CheckinError::LocationDenied
            | CheckinError::MissingCourseSelection
            | CheckinError::UnknownCourse(_) => Self::unprocessable(message),
            CheckinError::Busy => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

/// Serializable error data for JSON responses
#[derive(Debug, Serialize)]
pub struct ApiErrorData {
    /// Error code string
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ApiErrorData {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.code.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
