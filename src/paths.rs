//! Centralized path definitions for rollcall
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/rollcall/
//! └── config.toml               # Backend, site, token and portal settings
//! ```
//!
//! `ROLLCALL_CONFIG_DIR` overrides the directory, which keeps tests away
//! from the real home directory.

use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "ROLLCALL_CONFIG_DIR";

/// Config directory name under the platform config dir
const GLOBAL_DIR: &str = "rollcall";

/// Config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the rollcall config directory.
///
/// Returns `$ROLLCALL_CONFIG_DIR` if set, else `~/.config/rollcall/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
