//! IP Poster: Host Address Change Announcer
//!
//! Entry point for the ip-poster application.

use ip_poster::config::{Cli, Secrets, ValidatedConfig};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    let log_file = match setup_tracing(config.effective_log_level(), &config.log_directory) {
        Ok(path) => path,
        Err(e) => {
            eprintln!(
                "Failed to open log file in '{}': {e}",
                config.log_directory.display()
            );
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::info!("Logging to {}", log_file.display());
    tracing::info!("{config}");

    // Secrets are loaded after logging so URL warnings reach the log file
    let secrets = match Secrets::load(&config.secrets_file) {
        Ok(secrets) => secrets,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::info!("Webhook destinations: {secrets}");

    run_application(config, secrets)
}

/// Runs the main application with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig, secrets: Secrets) -> ExitCode {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    match runtime.block_on(run::execute(config, secrets)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}
