//! Launcher that reads an application name plus that application's options
//! from the command line and runs the matching built-in application.

pub mod apps;
pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod dispatch;
pub mod logging;
pub mod registry;
pub mod request;
pub mod status;

use std::ffi::OsString;

use anyhow::Result;
use clap::{Parser, error::ErrorKind};

use crate::{
    cli::Cli,
    config::LauncherConfig,
    diagnostics::{Diagnostics, TracingDiagnostics},
    dispatch::dispatch,
    logging::init::{init_tracing, init_tracing_with_file},
    registry::ApplicationRegistry,
    request::ApplicationRequest,
};

/// Parse `args` (program name first), set up logging and configuration,
/// and run the requested application.
///
/// Returns the status the process should exit with.
///
/// # Errors
/// Returns an error if configuration cannot be loaded for a named
/// application, or if the application itself fails. Parse failures are not
/// errors; they map to [`status::NO_PARSE_CMD_LINE`]. An empty token list
/// always maps to [`status::NO_APP_SPECIFIED`].
pub fn run<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            init_tracing(0);
            return Ok(parse_failure_status(&err, &TracingDiagnostics));
        }
    };

    let request = ApplicationRequest::from_tokens(&cli.args);
    if request.is_empty() {
        // Nothing to look up, so configuration and the registry are not needed
        init_tracing(cli.verbose);
        return dispatch_status(&ApplicationRegistry::new(), request, &TracingDiagnostics);
    }

    let config = LauncherConfig::load()?;
    match &config.log_dir {
        Some(dir) => {
            if let Err(err) = init_tracing_with_file(dir, cli.verbose) {
                init_tracing(cli.verbose);
                tracing::warn!("file logging disabled: {err:#}");
            }
        }
        None => init_tracing(cli.verbose),
    }
    tracing::debug!(?config, "loaded configuration");

    let registry = apps::build_registry(&config)?;
    dispatch_status(&registry, request, &TracingDiagnostics)
}

/// Split the parsed command line and dispatch it against `registry`.
///
/// # Errors
/// Returns the dispatched application's error unchanged.
pub fn run_with(
    registry: &ApplicationRegistry,
    cli: &Cli,
    diagnostics: &dyn Diagnostics,
) -> Result<i32> {
    dispatch_status(
        registry,
        ApplicationRequest::from_tokens(&cli.args),
        diagnostics,
    )
}

fn dispatch_status(
    registry: &ApplicationRegistry,
    request: ApplicationRequest,
    diagnostics: &dyn Diagnostics,
) -> Result<i32> {
    Ok(dispatch(registry, request, diagnostics)?.status())
}

/// Status for a command line clap refused.
///
/// `--help` and `--version` arrive here as well; clap prints them and the
/// run succeeds.
pub fn parse_failure_status(err: &clap::Error, diagnostics: &dyn Diagnostics) -> i32 {
    let status = if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        status::SUCCESS
    } else {
        diagnostics.warn(&format!(
            "command-line parsing failed: {}",
            err.kind().as_str().unwrap_or("invalid arguments")
        ));
        status::NO_PARSE_CMD_LINE
    };
    if let Err(io) = err.print() {
        diagnostics.warn(&format!("failed to print usage: {io}"));
    }
    status
}
