//! Report rendering and writing.
//!
//! A [`RepoSummary`] is written as up to three files named after the
//! repository:
//! - `<repo>.json`: the whole summary
//! - `<repo>.csv`: one row per commit
//! - `<repo>-commit-recs.txt`: one JSON record per line
//!
//! Which ones are produced is decided by the [`OutputConfig`] passed in.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use chrono::SecondsFormat;
use defectlog_config::OutputConfig;
use tracing::info;

use crate::{CoreResult, RepoSummary};

/// Suffix of the JSON report.
pub const JSON_SUFFIX: &str = ".json";

/// Suffix of the CSV report.
pub const CSV_SUFFIX: &str = ".csv";

/// Suffix of the per-record text report.
pub const RECORDS_SUFFIX: &str = "-commit-recs.txt";

/// CSV column order.
pub const CSV_COLUMNS: [&str; 11] = [
    "id",
    "author",
    "email",
    "date",
    "message",
    "is_defect",
    "source",
    "rule",
    "files_changed",
    "lines_added",
    "lines_deleted",
];

/// Renders the summary as a JSON document.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(summary: &RepoSummary, pretty: bool) -> CoreResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(summary)?
    } else {
        serde_json::to_string(summary)?
    };
    Ok(json)
}

/// Renders the commits as CSV with a header row.
#[must_use]
pub fn render_csv(summary: &RepoSummary) -> String {
    let mut out = CSV_COLUMNS.join(",");
    out.push('\n');

    for commit in &summary.commits {
        let classification = commit.classification();
        let date = commit.date.to_rfc3339_opts(SecondsFormat::Secs, true);
        let fields = [
            Cow::Borrowed(commit.id.as_str()),
            csv_field(&commit.author),
            csv_field(&commit.email),
            Cow::Owned(date),
            csv_field(&commit.message),
            Cow::Borrowed(if commit.is_defect() { "true" } else { "false" }),
            Cow::Borrowed(commit.source().as_str()),
            csv_field(classification.rule().unwrap_or_default()),
            Cow::Owned(commit.files.len().to_string()),
            Cow::Owned(commit.lines_added().to_string()),
            Cow::Owned(commit.lines_deleted().to_string()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Renders each commit as a compact JSON object on its own line.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_records(summary: &RepoSummary) -> CoreResult<String> {
    let mut out = String::new();
    for commit in &summary.commits {
        out.push_str(&serde_json::to_string(commit)?);
        out.push('\n');
    }
    Ok(out)
}

/// Quotes a field if it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Writes the enabled reports and returns the paths written.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or a file
/// cannot be written.
pub fn write_reports(summary: &RepoSummary, config: &OutputConfig) -> CoreResult<Vec<PathBuf>> {
    fs::create_dir_all(&config.dir)?;
    let mut written = Vec::new();

    if config.json {
        let path = config.path_for(&summary.repo, JSON_SUFFIX);
        fs::write(&path, render_json(summary, config.pretty)?)?;
        written.push(path);
    }

    if config.csv {
        let path = config.path_for(&summary.repo, CSV_SUFFIX);
        fs::write(&path, render_csv(summary))?;
        written.push(path);
    }

    if config.records {
        let path = config.path_for(&summary.repo, RECORDS_SUFFIX);
        fs::write(&path, render_records(summary)?)?;
        written.push(path);
    }

    for path in &written {
        info!(path = %path.display(), "wrote report");
    }
    Ok(written)
}
