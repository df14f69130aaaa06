//! HTTP server adapters
//!
//! Translate between HTTP frameworks and the HTTP-agnostic API layer.
//!
//! Currently supported:
//! - `tiny_http` - Lightweight blocking server for `rollcall serve`

#[cfg(feature = "server")]
pub mod tiny_http;
