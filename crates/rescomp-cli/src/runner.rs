//! Command execution and runtime logic.
//!
//! Contains mode dispatch and logging initialization.

use anyhow::{Context, Result};
use rescomp_core::cli::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Mode;
use crate::commands;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so that `-d` output on stdout stays machine-readable.
/// `verbose` forces debug level; otherwise `RUST_LOG` is honored and the
/// default is `warn`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

/// Executes the selected mode.
///
/// # Errors
///
/// Returns an error if the mode fails.
pub fn execute(mode: &Mode) -> Result<ExitCode> {
    match mode {
        Mode::Deps { config } => commands::deps::run(config),
        Mode::Generate(args) => commands::generate::run(args),
    }
}
