//! Git repository wrapper.

use std::path::Path;
use std::process::Command;

use defectlog_commit::LOG_FORMAT;
use git2::{ErrorCode, Repository as Git2Repo};
use tracing::debug;

use crate::{GitError, GitResult};

/// A read-only handle on a Git repository.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens the repository containing the given path.
    ///
    /// Like `git rev-parse --show-toplevel`, a path below the top level of a
    /// working copy resolves to that working copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not inside a Git
    /// repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GitError::RepoNotFound(path.to_path_buf()));
        }

        let inner = Git2Repo::discover(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        debug!(root = %inner.workdir().unwrap_or_else(|| inner.path()).display(), "opened repository");
        Ok(Self { inner })
    }

    /// Returns the top level of the working copy, or the Git directory for
    /// bare repositories.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns true if `HEAD` points at a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if `HEAD` cannot be resolved for a reason other than
    /// the branch having no commits yet.
    pub fn has_commits(&self) -> GitResult<bool> {
        match self.inner.head() {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns the full commit log as raw text in [`LOG_FORMAT`], with
    /// `--numstat` file statistics.
    ///
    /// A repository without commits yields empty text.
    ///
    /// # Errors
    ///
    /// Returns an error if `git` cannot be run or exits unsuccessfully.
    pub fn read_log(&self) -> GitResult<String> {
        if !self.has_commits()? {
            debug!("HEAD is unborn, no log to read");
            return Ok(String::new());
        }

        let output = Command::new("git")
            .arg("-C")
            .arg(self.root())
            .args([
                "-c",
                "core.quotepath=off",
                "-c",
                "log.showSignature=false",
                "log",
                "--no-color",
                "--numstat",
                &format!("--format={LOG_FORMAT}"),
            ])
            .output()
            .map_err(GitError::GitUnavailable)?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "read commit log");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
