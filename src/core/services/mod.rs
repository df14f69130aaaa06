//! Business logic services
//!
//! Pure decision logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`token`] - Token freshness window
//! - [`geofence`] - Haversine distance and site admission
//! - [`checkin`] - The check-in session state machine

pub mod checkin;
pub mod geofence;
pub mod token;

pub use checkin::{CheckinSession, CheckinState, DEFAULT_RESET_DELAY, Delivery, Ticket};
pub use geofence::{
    DEFAULT_RADIUS_METERS, DEFAULT_SITE, EARTH_RADIUS_METERS, FenceDecision, Geofence,
    distance_meters, is_within_fence,
};
pub use token::{DEFAULT_VALIDITY, TokenPolicy, TokenStatus, is_token_valid};
