//! Human-readable location details
//!
//! Filled in by a reverse geocoder for display next to a check-in. Never
//! part of the admission decision.

use serde::{Deserialize, Serialize};

/// Address details shown to the student after locating
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationDetails {
    /// Full formatted address
    pub display_name: String,

    /// Street name, empty when unknown
    pub street: String,

    /// Suburb or the nearest coarser locality, empty when unknown
    pub suburb: String,
}

impl LocationDetails {
    /// Placeholder used when the lookup fails
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            display_name: "Unknown location".to_string(),
            ..Self::default()
        }
    }
}
