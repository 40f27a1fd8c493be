//! Git error types.

use thiserror::Error;

/// Git-related errors. Every variant means the repository history cannot
/// be read.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository path does not exist.
    #[error("repository not found at {0}")]
    RepoNotFound(std::path::PathBuf),

    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// The `git` executable could not be started.
    #[error("git is not available: {0}")]
    GitUnavailable(#[source] std::io::Error),

    /// `git log` exited with a failure status.
    #[error("git command failed ({status}): {stderr}")]
    CommandFailed {
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
