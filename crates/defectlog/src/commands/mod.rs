//! CLI commands.

pub mod init;
pub mod rules;
pub mod scan;

use std::path::Path;

use anyhow::{Context, Result};
use defectlog_config::{Config, ConfigError, find_and_load_config, load_config};
use tracing::debug;

/// Loads the configuration from an explicit path, or searches for
/// `defectlog.toml` upward from the current directory.
///
/// Only the search may come up empty, in which case defaults are used.
pub(crate) fn load_configuration(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    match find_and_load_config() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(_)) => {
            debug!("no configuration file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("failed to load configuration"),
    }
}
