//! Initialize command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Args;
use defectlog_config::{CONFIG_FILE_NAME, Config};

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Runs the init command.
pub fn run(args: InitArgs) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!("{CONFIG_FILE_NAME} already exists, use --force to overwrite");
    }

    let content =
        toml::to_string_pretty(&Config::default()).context("failed to serialize configuration")?;
    std::fs::write(path, content).with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;

    println!("Created {CONFIG_FILE_NAME}");
    Ok(())
}
