//! Commit parsing error types.

use thiserror::Error;

/// A string that is not a 40 character hexadecimal commit hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected 40 hexadecimal characters, got {0:?}")]
pub struct InvalidCommitId(pub String);

/// Reasons a single log entry could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A required field is absent from the entry.
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// The commit hash is malformed.
    #[error("invalid commit id: {0}")]
    InvalidId(#[from] InvalidCommitId),

    /// The author date is not ISO 8601.
    #[error("invalid commit date {value:?}: {reason}")]
    InvalidDate {
        /// The raw date text.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Output before the first commit.
    #[error("unexpected text before the first commit: {0:?}")]
    UnexpectedText(String),
}
