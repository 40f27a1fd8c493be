//! Rules command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use defectlog_core::HeuristicSet;

/// Arguments for the rules command.
#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Configuration file (default: search for defectlog.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Runs the rules command.
///
/// Rules are compiled first so an invalid pattern is reported here too.
pub fn run(args: RulesArgs) -> Result<()> {
    let config = super::load_configuration(args.config.as_deref())?;
    let heuristics = HeuristicSet::from_config(&config.heuristics)?;

    let width = heuristics
        .rules()
        .map(|rule| rule.name.len())
        .max()
        .unwrap_or(0);
    for rule in heuristics.rules() {
        println!(
            "{:<width$}  {:<9}  {}",
            rule.name,
            rule.mode.as_str(),
            rule.pattern
        );
    }

    Ok(())
}
