//! Git access layer for defectlog.
//!
//! This crate provides read-only Git operations:
//! - Repository discovery and validation
//! - Commit log retrieval in the format `defectlog-commit` parses

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;
