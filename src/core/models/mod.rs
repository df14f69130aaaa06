//! Domain models for check-in
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`CheckinToken`] - Time-stamped token carried by the portal QR code
//! - [`GeoCoordinate`] - A WGS-84 position
//! - [`StudentRecord`] - A student and their enrolled courses
//! - [`AttendanceSubmission`] - What gets recorded on check-in
//! - [`LocationDetails`] - Display-only address for a position

mod attendance;
mod coordinate;
mod location;
mod student;
mod token;

pub use attendance::{AttendanceStatus, AttendanceSubmission};
pub use coordinate::{CoordinateError, GeoCoordinate};
pub use location::LocationDetails;
pub use student::{Course, StudentRecord};
pub use token::{CheckinToken, TokenError};
