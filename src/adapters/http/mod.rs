//! HTTP adapters
//!
//! - [`backend`] - The PHP attendance backend
//! - [`nominatim`] - Reverse geocoding for display

pub mod backend;
pub mod nominatim;

pub use backend::PhpBackend;
pub use nominatim::NominatimGeocoder;
