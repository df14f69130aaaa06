//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the check-in logic and the
//! systems it talks to: the attendance backend, the device's location
//! service, an address lookup service and the clock.
//!
//! Implementations live in the `adapters` module.

mod backend;
mod clock;
mod geolocation;

pub use backend::AttendanceBackend;
pub use clock::{Clock, FixedClock, SystemClock};
pub use geolocation::{Geolocator, LocationError, ReverseGeocoder};

#[cfg(test)]
pub use backend::MockAttendanceBackend;
#[cfg(test)]
pub use geolocation::{MockGeolocator, MockReverseGeocoder};
