//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Classify a git repository's commits as defect fixes.
#[derive(Debug, Parser)]
#[command(name = "defectlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify the history of a repository and write reports
    Scan(commands::scan::ScanArgs),

    /// Write a default defectlog.toml
    Init(commands::init::InitArgs),

    /// Print the effective heuristic rules
    Rules(commands::rules::RulesArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Scan(args) => commands::scan::run(args),
            Commands::Init(args) => commands::init::run(args),
            Commands::Rules(args) => commands::rules::run(args),
        }
    }
}
