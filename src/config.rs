//! Configuration management
//!
//! Settings for the backend, the allowed site, token validity, the portal
//! and reverse geocoding. Config is stored at
//! `~/.config/rollcall/config.toml` (XDG standard) unless a path is given.
//! A missing file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::core::models::GeoCoordinate;
use crate::core::services::{
    DEFAULT_RADIUS_METERS, DEFAULT_RESET_DELAY, DEFAULT_SITE, Geofence, TokenPolicy,
};
use crate::paths;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollcallConfig {
    /// Attendance backend
    #[serde(default)]
    pub backend: BackendConfig,
    /// Allowed check-in site
    #[serde(default)]
    pub site: SiteConfig,
    /// Token validity
    #[serde(default)]
    pub token: TokenConfig,
    /// Student portal
    #[serde(default)]
    pub portal: PortalConfig,
    /// Reverse geocoding
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Attendance backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the PHP scripts live under
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Script answering `action=validate`
    #[serde(default = "default_students_path")]
    pub students_path: String,
    /// Script answering `action=add`
    #[serde(default = "default_attendance_path")]
    pub attendance_path: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost/abbey_app/Abbey_backend".to_string()
}

fn default_students_path() -> String {
    "students.php".to_string()
}

fn default_attendance_path() -> String {
    "attendance.php".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            students_path: default_students_path(),
            attendance_path: default_attendance_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Allowed site and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site latitude in degrees
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Site longitude in degrees
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Admission radius in meters
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
}

const fn default_latitude() -> f64 {
    DEFAULT_SITE.latitude
}

const fn default_longitude() -> f64 {
    DEFAULT_SITE.longitude
}

const fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            radius_meters: default_radius(),
        }
    }
}

impl SiteConfig {
    /// Build the geofence, validating the coordinate and radius
    pub fn geofence(&self) -> anyhow::Result<Geofence> {
        let site = GeoCoordinate::new(self.latitude, self.longitude)
            .context("Invalid [site] coordinate in config")?;
        if !self.radius_meters.is_finite() || self.radius_meters < 0.0 {
            anyhow::bail!("Invalid [site] radius_meters: {}", self.radius_meters);
        }
        Ok(Geofence::new(site, self.radius_meters))
    }
}

/// Token validity settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Hours a QR code stays valid after issue
    #[serde(default = "default_validity_hours")]
    pub validity_hours: u64,
}

const fn default_validity_hours() -> u64 {
    13
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            validity_hours: default_validity_hours(),
        }
    }
}

impl TokenConfig {
    /// Token policy for these settings
    ///
    /// The window must be positive and fit in epoch milliseconds.
    pub fn policy(&self) -> anyhow::Result<TokenPolicy> {
        let secs = self
            .validity_hours
            .checked_mul(60 * 60)
            .filter(|secs| *secs > 0)
            .filter(|secs| secs.checked_mul(1000).and_then(|ms| i64::try_from(ms).ok()).is_some());
        let Some(secs) = secs else {
            anyhow::bail!("Invalid [token] validity_hours: {}", self.validity_hours);
        };
        Ok(TokenPolicy::new(Duration::from_secs(secs)))
    }
}

/// Student portal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Origin the QR code links to
    #[serde(default = "default_origin")]
    pub origin: String,
    /// How long outcomes stay on screen, in milliseconds
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
    /// Port for `rollcall serve`
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_reset_delay_ms() -> u64 {
    u64::try_from(DEFAULT_RESET_DELAY.as_millis()).unwrap_or(2500)
}

const fn default_port() -> u16 {
    8787
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            reset_delay_ms: default_reset_delay_ms(),
            port: default_port(),
        }
    }
}

impl PortalConfig {
    /// Reset delay
    #[must_use]
    pub const fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

/// Reverse geocoding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Whether to look up addresses at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Nominatim-compatible base URL
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
    /// User agent sent with lookups (Nominatim requires one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_true() -> bool {
    true
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    format!("rollcall/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl RollcallConfig {
    /// Get the default config file path
    #[must_use]
    pub fn config_path() -> PathBuf {
        paths::global_config()
    }

    /// Load config from `path`, or from the default location
    ///
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map_or_else(Self::config_path, Path::to_path_buf);
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
