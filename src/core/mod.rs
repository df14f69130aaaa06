//! Core check-in logic
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (token, coordinates, student, submission)
//! - `services/` - Token freshness, geofence and the check-in state machine
//! - `ports/` - Trait definitions for the backend, geolocation and clock
//! - `error` - The check-in error taxonomy

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use error::CheckinError;
