//! Built-in applications and the registry they are installed into.

use anyhow::{Result, bail};
use clap::Parser;

use crate::{config::LauncherConfig, registry::ApplicationRegistry};

pub mod mirror;
pub mod report;
pub mod restore;

pub const MIRROR: &str = "mirror";
pub const RESTORE: &str = "restore";
pub const REPORT: &str = "report";

/// Every application shipped with the launcher, in default lookup order.
pub const BUILTIN_APPS: &[&str] = &[MIRROR, RESTORE, REPORT];

/// Build the registry for the applications enabled in `config`.
///
/// # Errors
/// Returns an error if `config` names an application that is not built in,
/// or names one twice.
pub fn build_registry(config: &LauncherConfig) -> Result<ApplicationRegistry> {
    let mut registry = ApplicationRegistry::new();
    for name in &config.applications {
        match name.as_str() {
            MIRROR => registry.register(MIRROR, mirror::MirrorApp)?,
            RESTORE => registry.register(RESTORE, restore::RestoreApp)?,
            REPORT => registry.register(REPORT, report::ReportApp)?,
            other => bail!("no built-in application named {other}"),
        }
    }
    Ok(registry)
}

/// Parse an application's own options with clap.
///
/// On failure clap's message (or help text) has already been printed and
/// the `Err` carries the status the application should return.
fn parse_options<P: Parser>(name: &str, options: &[String]) -> std::result::Result<P, i32> {
    P::try_parse_from(std::iter::once(name).chain(options.iter().map(String::as_str))).map_err(
        |err| {
            if let Err(io) = err.print() {
                tracing::warn!("failed to print {name} usage: {io}");
            }
            err.exit_code()
        },
    )
}
