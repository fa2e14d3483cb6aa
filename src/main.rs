//! devnet-config CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use devnet_config::cli::{commands, handle_error, Cli, Commands};
use devnet_config::infrastructure::config::SettingsLoader;
use devnet_config::infrastructure::logging::logger::verbosity_level;
use devnet_config::infrastructure::logging::LoggerImpl;

fn init_logging(cli: &Cli) -> Result<LoggerImpl> {
    let mut settings = SettingsLoader::load(cli.settings.as_deref())?;
    if let Some(level) = verbosity_level(cli.verbose) {
        settings.logging.level = level.to_string();
    }
    LoggerImpl::init(&settings.logging)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logging(&cli) {
        Ok(logger) => logger,
        Err(err) => {
            handle_error(&err, cli.json);
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Check(args) => commands::check::execute(args, cli.json),
        Commands::Show(args) => commands::show::execute(args, cli.json),
        Commands::Export(args) => commands::export::execute(args, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            handle_error(&err, cli.json);
            ExitCode::FAILURE
        }
    }
}
