//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use rollcall::config::RollcallConfig;
use rollcall::output::OutputMode;

/// rollcall - QR-gated, geofenced attendance check-in
#[derive(Parser, Debug)]
#[command(
    name = "rollcall",
    version,
    about = "QR-gated, geofenced attendance check-in",
    long_about = "Check students in with a time-limited QR code and a geofence.\n\n\
                  The QR code carries its issue time and stays valid for 13 hours.\n\
                  Check-ins are accepted only within the configured radius of the site."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ~/.config/rollcall/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Issue or check QR tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Distance from a position to the allowed site
    Distance {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Check one student in
    Checkin {
        /// Token or portal URL from the QR code
        #[arg(short, long)]
        token: String,

        /// Student ID
        #[arg(short, long)]
        student_id: String,

        /// Course ID (required when the student has several courses)
        #[arg(short, long)]
        course: Option<String>,

        /// Device latitude; omit both to simulate a denied location
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Device longitude
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,

        /// Attendance status: present, late, absent
        #[arg(long, default_value = "present")]
        status: String,
    },

    /// Run an interactive check-in kiosk
    Kiosk {
        /// Token or portal URL from the QR code
        #[arg(short, long)]
        token: String,

        /// Kiosk latitude; omit both to simulate a denied location
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Kiosk longitude
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },

    /// Serve the portal API
    #[cfg(feature = "server")]
    Serve {
        /// Port to listen on (default from config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    /// Issue a token and its student portal link
    Issue {
        /// Issue time in epoch milliseconds (default: now)
        #[arg(long)]
        at: Option<i64>,

        /// Portal origin (default from config)
        #[arg(long)]
        origin: Option<String>,
    },

    /// Check whether a token is still accepted
    Check {
        /// Token or portal URL
        token: String,

        /// Evaluation time in epoch milliseconds (default: now)
        #[arg(long)]
        now: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": rollcall::VERSION,
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("rollcall v{}", rollcall::VERSION);
            println!("\nRun 'rollcall --help' for usage");
        }
        return Ok(());
    };

    if matches!(command, Command::Version) {
        if output_mode == OutputMode::Json {
            println!("{}", serde_json::json!({ "version": rollcall::VERSION }));
        } else {
            println!("rollcall v{}", rollcall::VERSION);
        }
        return Ok(());
    }

    let config_path = cli.config.clone();
    let config = RollcallConfig::load(config_path.as_deref())?;

    match command {
        Command::Token { action } => match action {
            TokenAction::Issue { at, origin } => {
                commands::token_issue(&config, at, origin.as_deref(), output_mode)
            },
            TokenAction::Check { token, now } => {
                commands::token_check(&config, &token, now, output_mode)
            },
        },
        Command::Distance { lat, lon } => commands::distance(&config, lat, lon, output_mode),
        Command::Checkin {
            token,
            student_id,
            course,
            lat,
            lon,
            status,
        } => commands::checkin(
            &config,
            &commands::CheckinArgs {
                token,
                student_id,
                course,
                lat,
                lon,
                status,
            },
            output_mode,
        ),
        Command::Kiosk { token, lat, lon } => commands::kiosk(&config, &token, lat, lon, output_mode),
        #[cfg(feature = "server")]
        Command::Serve { port } => commands::serve(&config, port),
        Command::Config { action } => {
            commands::config_cmd(&config, config_path.as_deref(), &action, output_mode)
        },
        Command::Version => Ok(()),
    }
}
