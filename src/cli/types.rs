//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::check::CheckArgs;
use super::commands::export::ExportArgs;
use super::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(name = "devnet-config")]
#[command(about = "Validate and inspect development network configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Tool settings file (YAML)
    #[arg(long, global = true, env = "DEVNET_SETTINGS_FILE")]
    pub settings: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file and summarize it
    Check(CheckArgs),

    /// Show the RPC endpoint or a single profile
    Show(ShowArgs),

    /// Print the normalized configuration
    Export(ExportArgs),
}
