//! HTTP-agnostic portal API
//!
//! Typed request/response structures and handlers that any HTTP server
//! implementation (or a test) can call directly.
//!
//! ## Design
//!
//! - **Handlers are plain methods on [`Portal`]**: typed input, `Result<T, ApiError>` out
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::Portal;
pub use types::{ApiResponse, CheckinBody, SiteData};
