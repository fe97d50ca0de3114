use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::apps::BUILTIN_APPS;

/// Environment variable restricting which applications are registered.
pub const APPS_ENV: &str = "DUMMYFILES_APPS";
/// Environment variable enabling file logging into the given directory.
pub const LOG_DIR_ENV: &str = "DUMMYFILES_LOG_DIR";

/// Launcher configuration values sourced from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Applications to register, in lookup order.
    pub applications: Vec<String>,
    /// Directory for the rolling log file, if file logging is enabled.
    pub log_dir: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            applications: BUILTIN_APPS.iter().map(ToString::to_string).collect(),
            log_dir: None,
        }
    }
}

impl LauncherConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if `DUMMYFILES_APPS` names an unknown application.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns an error if the application list names an unknown application.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut out = Self::default();

        if let Some(raw) = lookup(APPS_ENV) {
            let mut apps = Vec::new();
            for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                if !BUILTIN_APPS.contains(&name) {
                    bail!(
                        "{APPS_ENV} names unknown application {name:?} (known: {})",
                        BUILTIN_APPS.join(", ")
                    );
                }
                if !apps.iter().any(|a| a == name) {
                    apps.push(name.to_string());
                }
            }
            out.applications = apps;
        }

        if let Some(dir) = lookup(LOG_DIR_ENV)
            && !dir.trim().is_empty()
        {
            out.log_dir = Some(PathBuf::from(dir));
        }

        Ok(out)
    }
}
