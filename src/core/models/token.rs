//! Check-in token model
//!
//! A check-in token is the base64 encoding of the decimal epoch-millisecond
//! timestamp at which it was issued. It is reversible, unsigned and carries
//! no secret: anyone can mint one. It only proves that a QR code is recent.
//!
//! # Examples
//!
//! ```
//! use rollcall::core::models::CheckinToken;
//!
//! let token = CheckinToken::issue(1_700_000_000_000);
//! assert_eq!(token.encode(), "MTcwMDAwMDAwMDAwMA==");
//!
//! let decoded = CheckinToken::decode("MTcwMDAwMDAwMDAwMA==").unwrap();
//! assert_eq!(decoded.issued_at_millis(), 1_700_000_000_000);
//! ```

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Standard alphabet, padding optional on decode
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors that can occur when decoding a token
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token string was empty
    #[error("empty token")]
    Empty,

    /// Token was not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes were not UTF-8
    #[error("token payload is not UTF-8")]
    Utf8,

    /// Decoded payload was not a base-10 integer
    #[error("token payload is not a timestamp: {0:?}")]
    Timestamp(String),
}

/// A decoded check-in token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinToken {
    issued_at_millis: i64,
}

impl CheckinToken {
    /// Create a token issued at the given time
    #[must_use]
    pub const fn issue(issued_at_millis: i64) -> Self {
        Self { issued_at_millis }
    }

    /// Milliseconds since the Unix epoch at which the token was issued
    #[must_use]
    pub const fn issued_at_millis(&self) -> i64 {
        self.issued_at_millis
    }

    /// Encode as base64 of the decimal timestamp
    #[must_use]
    pub fn encode(&self) -> String {
        STANDARD.encode(self.issued_at_millis.to_string())
    }

    /// Decode a raw token taken from a query string
    ///
    /// Padding is optional, and spaces are read back as `+` since form
    /// decoding of an unescaped query turns `+` into a space.
    pub fn decode(raw: &str) -> Result<Self, TokenError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TokenError::Empty);
        }

        let bytes = LENIENT.decode(raw.replace(' ', "+"))?;
        let text = String::from_utf8(bytes).map_err(|_| TokenError::Utf8)?;
        let issued_at_millis =
            text.trim().parse::<i64>().map_err(|_| TokenError::Timestamp(text.clone()))?;

        Ok(Self { issued_at_millis })
    }
}

impl std::fmt::Display for CheckinToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}
