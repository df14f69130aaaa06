//! rollcall - QR-gated, geofenced attendance check-in
//!
//! Students scan a time-limited QR code, enter their ID, pick a course and
//! are admitted only when their device is within a configured radius of the
//! allowed site. The attendance backend is an external HTTP service.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod kiosk;
pub mod output;
pub mod paths;
pub mod qr_link;
pub mod server;
