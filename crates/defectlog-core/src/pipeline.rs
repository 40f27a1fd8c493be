//! End-to-end classification of a repository's history.

use std::path::Path;

use defectlog_commit::{CommitRecord, LogEntries};
use defectlog_git::Repository;
use tracing::{debug, info, warn};

use crate::{Classifier, CoreResult, Diagnostics, HeuristicSet, OverrideSet, RepoSummary, Warning};

/// Parses, classifies and assembles a commit log.
#[derive(Debug, Clone)]
pub struct Pipeline {
    heuristics: HeuristicSet,
    overrides: OverrideSet,
    warnings: Vec<Warning>,
}

impl Pipeline {
    /// Creates a pipeline with the given rules and override set.
    #[must_use]
    pub fn new(heuristics: HeuristicSet, overrides: OverrideSet) -> Self {
        Self {
            heuristics,
            overrides,
            warnings: Vec::new(),
        }
    }

    /// Carries warnings raised before the run, such as while loading the
    /// override file, into the summary.
    #[must_use]
    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = Warning>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    /// Parses and classifies every entry of a raw log.
    ///
    /// Malformed entries are skipped and recorded; the returned records keep
    /// log order.
    #[must_use]
    pub fn classify_log(&self, log: &str) -> (Vec<CommitRecord>, Diagnostics) {
        let classifier = Classifier::new(&self.heuristics, &self.overrides);
        let mut diagnostics: Diagnostics = self.warnings.iter().cloned().collect();
        let mut records = Vec::new();

        for (idx, entry) in LogEntries::new(log).enumerate() {
            match entry {
                Ok(mut record) => {
                    classifier.classify(&mut record);
                    records.push(record);
                }
                Err(e) => {
                    let position = idx + 1;
                    warn!(position, error = %e, "skipping malformed log entry");
                    diagnostics.push(Warning::MalformedEntry {
                        position,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let skipped = diagnostics.skipped_entries();
        if skipped > 0 {
            debug!(skipped, "skipped malformed log entries");
        }
        (records, diagnostics)
    }

    /// Classifies a raw log and assembles the summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository path has no name or the log holds
    /// no parseable commit.
    pub fn run(&self, log: &str, repo_path: &Path, owner: &str) -> CoreResult<RepoSummary> {
        let (records, diagnostics) = self.classify_log(log);
        let summary = RepoSummary::assemble(repo_path, owner, records, diagnostics)?;

        info!(
            repo = %summary.repo,
            total = summary.total_commits,
            defects = summary.defect_commits,
            skipped = summary.skipped_entries,
            "classified commit history"
        );
        Ok(summary)
    }

    /// Reads the log of a repository and runs it through the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or [`Pipeline::run`]
    /// fails.
    pub fn scan(&self, repo: &Repository, owner: &str) -> CoreResult<RepoSummary> {
        let log = repo.read_log()?;
        self.run(&log, repo.root(), owner)
    }
}
