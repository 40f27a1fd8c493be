//! Commit types for defectlog.
//!
//! This crate provides the commit types used throughout defectlog:
//! - [`CommitId`]: A validated 40 character commit hash
//! - [`CommitRecord`]: A commit as parsed from the log, plus its classification
//! - [`LogEntries`]: A lazy parser over raw `git log` output

mod error;
mod id;
mod log;
mod record;

pub use error::{InvalidCommitId, ParseError};
pub use id::CommitId;
pub use log::{FIELD_COUNT, FIELD_TERMINATOR, LOG_FORMAT, LogEntries};
pub use record::{Classification, ClassificationSource, CommitRecord, FileChange};
