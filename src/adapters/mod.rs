//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `http/` - The PHP attendance backend and Nominatim reverse geocoding
//! - `location` - Device position supplied by the operator

pub mod http;
pub mod location;

pub use http::{NominatimGeocoder, PhpBackend};
pub use location::FixedGeolocator;
