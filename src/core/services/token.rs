//! Token freshness checks
//!
//! Decides whether a check-in token taken from the portal URL is still
//! inside its validity window. Pure: the current time is passed in.

use std::time::Duration;

use serde::Serialize;

use crate::core::models::CheckinToken;

/// Default validity window: 13 hours
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(13 * 60 * 60);

/// Outcome of evaluating a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TokenStatus {
    /// Inside the window
    Valid {
        /// Milliseconds since issue
        age_millis: i64,
        /// Milliseconds until the token stops being accepted
        expires_in_millis: i64,
    },
    /// No token supplied
    Missing,
    /// Token could not be decoded
    Malformed,
    /// Older than the window
    Expired {
        /// Milliseconds since issue
        age_millis: i64,
    },
    /// Issued after `now`
    FromFuture {
        /// How far ahead of `now` the token claims to be
        ahead_millis: i64,
    },
}

impl TokenStatus {
    /// Whether the token admits the student to the check-in form
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid { .. } => write!(f, "valid"),
            Self::Missing => write!(f, "missing"),
            Self::Malformed => write!(f, "malformed"),
            Self::Expired { .. } => write!(f, "expired"),
            Self::FromFuture { .. } => write!(f, "from the future"),
        }
    }
}

/// Validity rules for check-in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    validity: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VALIDITY)
    }
}

impl TokenPolicy {
    /// Create a policy with the given window
    #[must_use]
    pub const fn new(validity: Duration) -> Self {
        Self { validity }
    }

    /// Validity window length
    #[must_use]
    pub const fn validity(&self) -> Duration {
        self.validity
    }

    fn window_millis(&self) -> i64 {
        i64::try_from(self.validity.as_millis()).unwrap_or(i64::MAX)
    }

    /// Evaluate a raw token against `now_millis`
    ///
    /// Valid iff `0 <= now - issued <= window`. Never fails: anything that
    /// does not decode is [`TokenStatus::Malformed`].
    #[must_use]
    pub fn evaluate(&self, raw: Option<&str>, now_millis: i64) -> TokenStatus {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return TokenStatus::Missing;
        };

        let token = match CheckinToken::decode(raw) {
            Ok(token) => token,
            Err(e) => {
                log::debug!("rejecting token {raw:?}: {e}");
                return TokenStatus::Malformed;
            },
        };

        let age_millis = now_millis.saturating_sub(token.issued_at_millis());
        let window = self.window_millis();

        if age_millis < 0 {
            TokenStatus::FromFuture {
                ahead_millis: age_millis.saturating_neg(),
            }
        } else if age_millis > window {
            TokenStatus::Expired { age_millis }
        } else {
            TokenStatus::Valid {
                age_millis,
                expires_in_millis: window - age_millis,
            }
        }
    }
}

/// Whether `raw_token` is fresh at `now_millis` under the default 13-hour window
#[must_use]
pub fn is_token_valid(raw_token: Option<&str>, now_millis: i64) -> bool {
    TokenPolicy::default().evaluate(raw_token, now_millis).is_valid()
}
