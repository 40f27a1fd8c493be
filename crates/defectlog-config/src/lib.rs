//! Configuration management for defectlog.
//!
//! This crate handles loading and validating the `defectlog.toml`
//! configuration file.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, load_config};
pub use schema::{
    Config, DEFAULT_OWNER, HeuristicRule, HeuristicsConfig, MatchMode, OutputConfig,
    OverridesConfig,
};
