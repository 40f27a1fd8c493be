//! Core error types.

use std::path::PathBuf;

use thiserror::Error;

/// Core-related errors. All of them end the run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The repository history could not be read.
    #[error("git error: {0}")]
    Git(#[from] defectlog_git::GitError),

    /// A heuristic rule does not compile.
    #[error("invalid pattern for heuristic rule {name}: {source}")]
    InvalidPattern {
        /// The rule name.
        name: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// No commit could be parsed from the log.
    #[error("no commits found in repository ({skipped} malformed entries skipped)")]
    EmptyRepository {
        /// Number of malformed entries that were skipped.
        skipped: usize,
    },

    /// The repository path has no final segment to name it by.
    #[error("cannot derive a repository name from {0}")]
    UnnamedRepository(PathBuf),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_repository_display() {
        let err = CoreError::EmptyRepository { skipped: 2 };
        assert_eq!(
            err.to_string(),
            "no commits found in repository (2 malformed entries skipped)"
        );
    }

    #[test]
    fn test_unnamed_repository_display() {
        let err = CoreError::UnnamedRepository(PathBuf::from("/"));
        assert_eq!(err.to_string(), "cannot derive a repository name from /");
    }

    #[test]
    fn test_git_error_converts() {
        let git = defectlog_git::GitError::NotARepo(PathBuf::from("/tmp/x"));
        let err = CoreError::from(git);
        assert_eq!(err.to_string(), "git error: not a git repository: /tmp/x");
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = CoreError::InvalidPattern {
            name: "broken".to_string(),
            source,
        };
        assert!(
            err.to_string()
                .starts_with("invalid pattern for heuristic rule broken: ")
        );
    }
}
