//! Authoritative list of defect-fixing commits.
//!
//! Heuristics miss commits whose messages say nothing about the defect they
//! fix. An override file lists such commits, one full hash per line, and
//! membership always wins over the heuristics.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use defectlog_commit::CommitId;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::Warning;

/// Why an override file could not be used.
#[derive(Debug, Error)]
pub enum OverrideError {
    /// There is no file at the path.
    #[error("override file not found: {0}")]
    Missing(PathBuf),

    /// The file exists but reading it failed.
    #[error("cannot read override file {path}: {source}")]
    Unreadable {
        /// Path of the override file.
        path: PathBuf,
        /// The IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Commit ids known to fix defects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    ids: HashSet<CommitId>,
}

/// An override set together with the warnings raised while building it.
#[derive(Debug, Clone, Default)]
pub struct OverrideLoad {
    /// The usable ids.
    pub set: OverrideSet,
    /// Lines or files that had to be skipped.
    pub warnings: Vec<Warning>,
}

impl OverrideSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses override file contents, one commit hash per line.
    ///
    /// Blank lines and lines that are not a 40 character hash are skipped
    /// with a warning. Duplicates collapse.
    #[must_use]
    pub fn parse(content: &str) -> OverrideLoad {
        let mut load = OverrideLoad::default();

        for (idx, line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();

            let reason = if trimmed.is_empty() {
                "blank line".to_string()
            } else {
                match CommitId::parse(trimmed) {
                    Ok(id) => {
                        load.set.insert(id);
                        continue;
                    }
                    Err(e) => e.to_string(),
                }
            };

            warn!(line = line_no, %reason, "ignoring override line");
            load.warnings.push(Warning::InvalidOverrideLine {
                line: line_no,
                reason,
            });
        }

        debug!(count = load.set.len(), "parsed override ids");
        load
    }

    /// Reads and parses an override file.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::Missing`] if there is no file and
    /// [`OverrideError::Unreadable`] for any other read failure.
    pub fn read(path: impl AsRef<Path>) -> Result<OverrideLoad, OverrideError> {
        let path = path.as_ref();
        Self::from_contents(path, std::fs::read_to_string(path))
    }

    fn from_contents(
        path: &Path,
        contents: std::io::Result<String>,
    ) -> Result<OverrideLoad, OverrideError> {
        match contents {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(OverrideError::Missing(path.to_path_buf()))
            }
            Err(source) => Err(OverrideError::Unreadable {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reads an override file, falling back to an empty set.
    ///
    /// A missing file is the normal case and only logged. An unreadable one
    /// also records a warning.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> OverrideLoad {
        let path = path.as_ref();
        Self::recover(path, Self::read(path))
    }

    fn recover(path: &Path, result: Result<OverrideLoad, OverrideError>) -> OverrideLoad {
        match result {
            Ok(load) => {
                info!(path = %path.display(), count = load.set.len(), "loaded override ids");
                load
            }
            Err(OverrideError::Missing(_)) => {
                info!(path = %path.display(), "no override file, using heuristics only");
                OverrideLoad::default()
            }
            Err(OverrideError::Unreadable { path, source }) => {
                warn!(path = %path.display(), error = %source, "override file is unreadable");
                OverrideLoad {
                    set: Self::new(),
                    warnings: vec![Warning::OverrideFileUnreadable {
                        path,
                        reason: source.to_string(),
                    }],
                }
            }
        }
    }

    /// Adds an id. Returns false if it was already present.
    pub fn insert(&mut self, id: CommitId) -> bool {
        self.ids.insert(id)
    }

    /// Returns true if the id is listed.
    #[must_use]
    pub fn contains(&self, id: &CommitId) -> bool {
        self.ids.contains(id)
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no ids are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<CommitId> for OverrideSet {
    fn from_iter<T: IntoIterator<Item = CommitId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
