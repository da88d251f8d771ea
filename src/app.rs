//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use ip_poster::config::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable or invalid config, secrets, or log directory.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - initialization failure, failed single check, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::FileRead { path, .. } => {
            eprintln!(
                "\nCreate '{}' or point to another file with --config / --secrets.",
                path.display()
            );
        }
        ConfigError::NoDestinations { .. } => {
            eprintln!("\nAdd a \"slack\" or \"discord\" webhook URL to the secrets file.");
        }
        _ => {}
    }
}

/// Name of the log file for the given day: `ip_poster_YYYY-MM-DD.log`.
#[must_use]
pub fn log_file_name(date: NaiveDate) -> String {
    format!("ip_poster_{}.log", date.format("%Y-%m-%d"))
}

/// Sets up the tracing subscriber for logging.
///
/// Records go to stderr and, without ANSI colors, to a per-day file in
/// `log_directory` (created if absent). `RUST_LOG` overrides `level`.
///
/// # Errors
///
/// Returns an error if the directory or log file cannot be created.
pub fn setup_tracing(level: Level, log_directory: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(log_directory)?;

    let path = log_directory.join(log_file_name(Utc::now().date_naive()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(path)
}
