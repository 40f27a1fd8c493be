//! Recoverable problems recorded during a run.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A problem that was skipped over rather than failing the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A log entry could not be parsed and was left out.
    MalformedEntry {
        /// 1-based position of the entry in the log.
        position: usize,
        /// Why the entry was rejected.
        reason: String,
    },

    /// A line of the override file was ignored.
    InvalidOverrideLine {
        /// 1-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// The override file exists but could not be read.
    OverrideFileUnreadable {
        /// Path of the override file.
        path: PathBuf,
        /// The underlying error.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEntry { position, reason } => {
                write!(f, "skipped malformed log entry {position}: {reason}")
            }
            Self::InvalidOverrideLine { line, reason } => {
                write!(f, "ignored override line {line}: {reason}")
            }
            Self::OverrideFileUnreadable { path, reason } => {
                write!(
                    f,
                    "override file {} is unreadable, using heuristics only: {reason}",
                    path.display()
                )
            }
        }
    }
}

/// Warnings accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Creates an empty set of diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Returns the recorded warnings in order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Number of log entries that were skipped as malformed.
    #[must_use]
    pub fn skipped_entries(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::MalformedEntry { .. }))
            .count()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consumes the diagnostics, returning the warnings.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

impl Extend<Warning> for Diagnostics {
    fn extend<T: IntoIterator<Item = Warning>>(&mut self, iter: T) {
        self.warnings.extend(iter);
    }
}

impl FromIterator<Warning> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Warning>>(iter: T) -> Self {
        Self {
            warnings: iter.into_iter().collect(),
        }
    }
}
