//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize as _;
use serde::Serialize;

use crate::core::models::{GeoCoordinate, LocationDetails};
use crate::core::services::TokenStatus;
use crate::kiosk::CheckinReceipt;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// A freshly issued token
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    /// Encoded token
    pub token: String,
    /// Issue time, epoch milliseconds
    pub issued_at_millis: i64,
    /// Issue time, RFC 3339
    pub issued_at: String,
    /// Last accepted moment, RFC 3339
    pub expires_at: String,
    /// Student portal link for the QR code
    pub url: String,
}

impl IssuedToken {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Token:   {}", self.token.bold());
        println!("Issued:  {}", self.issued_at);
        println!("Expires: {}", self.expires_at);
        println!();
        println!("Student portal link:");
        println!("  {}", self.url);
    }
}

/// Result of checking a token
#[derive(Debug, Serialize)]
pub struct TokenReport {
    /// Raw token as extracted from the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Whether the token is accepted
    pub valid: bool,
    /// Detailed status
    #[serde(flatten)]
    pub status: TokenStatus,
}

impl TokenReport {
    /// Build a report from an evaluated status
    #[must_use]
    pub const fn new(token: Option<String>, status: TokenStatus) -> Self {
        Self {
            token,
            valid: status.is_valid(),
            status,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        match self.status {
            TokenStatus::Valid {
                age_millis,
                expires_in_millis,
            } => {
                println!("{}", "Token is valid".green());
                println!("  Issued {} ago", format_duration(age_millis));
                println!("  Expires in {}", format_duration(expires_in_millis));
            },
            TokenStatus::Missing => println!("{}", "No token supplied".red()),
            TokenStatus::Malformed => println!("{}", "Token is malformed".red()),
            TokenStatus::Expired { age_millis } => {
                println!("{}", "Token has expired".red());
                println!("  Issued {} ago", format_duration(age_millis));
            },
            TokenStatus::FromFuture { ahead_millis } => {
                println!("{}", "Token is dated in the future".red());
                println!("  {} ahead of this clock", format_duration(ahead_millis));
            },
        }
    }
}

/// Result of a distance check
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DistanceReport {
    /// Position checked
    pub position: GeoCoordinate,
    /// Allowed site
    pub site: GeoCoordinate,
    /// Admission radius
    pub radius_meters: f64,
    /// Great-circle distance to the site
    pub distance_meters: f64,
    /// Whether the position is admitted
    pub admitted: bool,
}

impl DistanceReport {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!(
            "{:.1} m from the site ({}), radius {:.0} m",
            self.distance_meters, self.site, self.radius_meters
        );
        if self.admitted {
            println!("{}", "Inside the allowed area".green());
        } else {
            println!("{}", "Outside the allowed area".red());
        }
    }
}

/// Outcome of a check-in, successful or not
#[derive(Debug, Serialize)]
pub struct CheckinReport {
    /// Whether attendance was recorded
    pub success: bool,
    /// Message shown to the student
    pub message: String,
    /// Machine-readable failure kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    /// Receipt when recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<CheckinReceipt>,
}

impl CheckinReport {
    /// Report for a recorded check-in
    #[must_use]
    pub fn recorded(receipt: CheckinReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message.clone(),
            error: None,
            receipt: Some(receipt),
        }
    }

    /// Report for a failed check-in
    #[must_use]
    pub fn failed(error: &crate::core::CheckinError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            error: Some(error.kind()),
            receipt: None,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let Some(receipt) = &self.receipt else {
            println!("{}", self.message.red());
            return;
        };

        println!("{}", self.message.green());
        println!(
            "  {} ({}) checked in to {} as {}",
            receipt.student.student_name,
            receipt.student.student_id,
            receipt.course.course_name,
            receipt.submission.status
        );
        println!("  {:.0} m from the site", receipt.distance_meters);
        if let Some(location) = &receipt.location {
            println!("  Near {}", describe_location(location));
        }
    }
}

fn describe_location(location: &LocationDetails) -> String {
    match (location.street.is_empty(), location.suburb.is_empty()) {
        (false, false) => format!("{}, {}", location.street, location.suburb),
        (false, true) => location.street.clone(),
        (true, false) => location.suburb.clone(),
        (true, true) => location.display_name.clone(),
    }
}

/// Format milliseconds as `13h 0m`, `4m 10s` or `250ms`
#[must_use]
pub fn format_duration(millis: i64) -> String {
    let millis = millis.unsigned_abs();
    let secs = millis / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else if s > 0 {
        format!("{s}s")
    } else {
        format!("{millis}ms")
    }
}
