//! Config command - show the effective configuration

use std::path::Path;

use rollcall::config::RollcallConfig;
use rollcall::output::OutputMode;

use crate::cli::ConfigAction;

/// Handle `config show` and `config path`
pub fn config_cmd(
    config: &RollcallConfig,
    path: Option<&Path>,
    action: &ConfigAction,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let path = path.map_or_else(RollcallConfig::config_path, Path::to_path_buf);

    match action {
        ConfigAction::Show => {
            if mode == OutputMode::Json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(config)?);
            }
        },
        ConfigAction::Path => {
            if mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({ "path": path, "exists": path.exists() })
                );
            } else {
                println!("{}", path.display());
            }
        },
    }
    Ok(())
}
