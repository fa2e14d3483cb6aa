//! Command-line interface for checking and inspecting configuration files.

pub mod commands;
pub mod display;
pub mod types;

pub use types::{Cli, Commands};

use crate::domain::ConfigError;
use display::action_failure;

/// Report a command failure on stderr (or stdout as JSON in JSON mode).
pub fn handle_error(err: &anyhow::Error, json_mode: bool) {
    let config_error = err.chain().find_map(|e| e.downcast_ref::<ConfigError>());
    let path = config_error.and_then(ConfigError::path);

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
            "path": path,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{}", action_failure(&format!("{err:#}")));
    }
}
