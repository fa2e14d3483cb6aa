//! Implementation of the `devnet-config export` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::cli::display::action_success;
use crate::domain::models::ConfigDocument;
use crate::infrastructure::config::ConfigLoader;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Configuration file to read
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Serialize a document in the same external shape the loader accepts.
pub fn render(document: &ConfigDocument, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to serialize configuration as JSON")
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(document).context("Failed to serialize configuration as YAML")
        }
    }
}

pub fn execute(args: &ExportArgs, json_mode: bool) -> Result<()> {
    let document = ConfigLoader::load_file(&args.path)?;
    let rendered = render(&document, args.format)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if json_mode {
                println!("{}", serde_json::json!({ "success": true, "output": path }));
            } else {
                println!("{}", action_success(&format!("Wrote {}", path.display())));
            }
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(())
}
