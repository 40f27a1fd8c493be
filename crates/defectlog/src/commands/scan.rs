//! Scan command.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use defectlog_config::Config;
use defectlog_core::{HeuristicSet, OverrideSet, Pipeline, repo_name, report};
use defectlog_git::Repository;
use tracing::debug;

/// Arguments for the scan command.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Repository to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Owner label recorded in the report
    #[arg(short, long, env = "DEFECTLOG_OWNER")]
    pub owner: Option<String>,

    /// Configuration file (default: search for defectlog.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override file (default: <repo>.dft in the configured directory)
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Write the CSV report
    #[arg(long, overrides_with = "no_csv")]
    pub csv: bool,

    /// Do not write the CSV report
    #[arg(long, overrides_with = "csv")]
    pub no_csv: bool,

    /// Also write one JSON record per line to <repo>-commit-recs.txt
    #[arg(long)]
    pub records: bool,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl ScanArgs {
    /// Applies command line flags on top of the loaded configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(owner) = &self.owner {
            config.owner.clone_from(owner);
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir.clone_from(dir);
        }
        if self.csv {
            config.output.csv = true;
        }
        if self.no_csv {
            config.output.csv = false;
        }
        if self.records {
            config.output.records = true;
        }
        if self.compact {
            config.output.pretty = false;
        }
    }
}

/// Runs the scan command.
pub fn run(args: ScanArgs) -> Result<()> {
    let mut config = super::load_configuration(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;

    let repo = Repository::open(&args.path)
        .with_context(|| format!("cannot access repository at {}", args.path.display()))?;
    let name = repo_name(repo.root())
        .ok_or_else(|| anyhow!("cannot derive a name for {}", repo.root().display()))?;
    debug!(root = %repo.root().display(), %name, "opened repository");

    let override_path = args
        .overrides
        .clone()
        .unwrap_or_else(|| config.overrides.path_for(&name));
    let overrides = OverrideSet::load(&override_path);

    let heuristics = HeuristicSet::from_config(&config.heuristics)?;
    let summary = Pipeline::new(heuristics, overrides.set)
        .with_warnings(overrides.warnings)
        .scan(&repo, &config.owner)?;

    let written = report::write_reports(&summary, &config.output)
        .context("failed to write reports")?;

    println!(
        "{}: {} commits, {} defects, {} skipped",
        summary.repo, summary.total_commits, summary.defect_commits, summary.skipped_entries
    );
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}
