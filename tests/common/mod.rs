//! Common test utilities shared across test types
//!
//! - `fake_backend.rs` - In-process stand-in for the PHP attendance backend

pub mod fake_backend;
