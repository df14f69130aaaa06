//! Command implementations

mod checkin;
mod config_cmd;
mod distance;
mod kiosk;
#[cfg(feature = "server")]
mod serve;
mod token;

pub use checkin::{CheckinArgs, checkin};
pub use config_cmd::config_cmd;
pub use distance::distance;
pub use kiosk::kiosk;
#[cfg(feature = "server")]
pub use serve::serve;
pub use token::{token_check, token_issue};
