//! Core library for defectlog.
//!
//! This crate turns a raw commit log into a classified [`RepoSummary`]:
//! - [`OverrideSet`]: authoritative defect-fixing commits from a sidecar file
//! - [`HeuristicSet`] and [`Classifier`]: message-based defect detection
//! - [`RepoSummary`]: the assembled, serializable result
//! - [`Pipeline`]: reads, parses, classifies and assembles in one pass
//! - [`report`]: JSON, CSV and per-record text rendering

mod classifier;
mod error;
mod overrides;
mod pipeline;
pub mod report;
mod summary;
mod warning;

pub use classifier::{Classifier, HeuristicSet};
pub use error::{CoreError, CoreResult};
pub use overrides::{OverrideError, OverrideLoad, OverrideSet};
pub use pipeline::Pipeline;
pub use summary::{RepoSummary, repo_name};
pub use warning::{Diagnostics, Warning};
