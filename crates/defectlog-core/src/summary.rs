//! Repository summary assembly.

use std::path::Path;

use defectlog_commit::CommitRecord;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Diagnostics, Warning};

/// The classified commit history of one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSummary {
    /// Repository name, the last segment of its path.
    pub repo: String,

    /// Display label for the owner.
    pub owner: String,

    /// Number of commits parsed from the log.
    pub total_commits: usize,

    /// Number of commits classified as defect fixes.
    pub defect_commits: usize,

    /// Number of log entries skipped as malformed.
    pub skipped_entries: usize,

    /// Everything that was skipped or ignored along the way.
    #[serde(default)]
    pub warnings: Vec<Warning>,

    /// Commits in log order.
    pub commits: Vec<CommitRecord>,
}

impl RepoSummary {
    /// Builds a summary from classified records.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnnamedRepository`] if the path has no final
    /// segment and [`CoreError::EmptyRepository`] if there are no records.
    pub fn assemble(
        repo_path: &Path,
        owner: impl Into<String>,
        commits: Vec<CommitRecord>,
        diagnostics: Diagnostics,
    ) -> CoreResult<Self> {
        let repo = repo_name(repo_path)
            .ok_or_else(|| CoreError::UnnamedRepository(repo_path.to_path_buf()))?;

        let skipped_entries = diagnostics.skipped_entries();
        if commits.is_empty() {
            return Err(CoreError::EmptyRepository {
                skipped: skipped_entries,
            });
        }

        let defect_commits = commits.iter().filter(|c| c.is_defect()).count();

        Ok(Self {
            repo,
            owner: owner.into(),
            total_commits: commits.len(),
            defect_commits,
            skipped_entries,
            warnings: diagnostics.into_warnings(),
            commits,
        })
    }
}

/// Returns the final non-empty segment of a repository path.
///
/// Trailing separators are ignored; paths ending in `..` or consisting only
/// of a root have no name.
#[must_use]
pub fn repo_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use defectlog_commit::{Classification, CommitId};

    fn make_record(n: u8, defect: bool) -> CommitRecord {
        let hash = format!("{n:0>40x}");
        let mut record = CommitRecord::new(
            CommitId::parse(&hash).unwrap(),
            "Test",
            "test@example.com",
            Utc::now(),
            format!("commit {n}"),
        );
        if defect {
            record.classify(Classification::heuristic("fix"));
        }
        record
    }

    #[test]
    fn test_repo_name() {
        assert_eq!(
            repo_name(Path::new("/home/me/projects/parser")).as_deref(),
            Some("parser")
        );
        assert_eq!(
            repo_name(Path::new("/home/me/projects/parser/")).as_deref(),
            Some("parser")
        );
        assert_eq!(repo_name(Path::new("relative/repo")).as_deref(), Some("repo"));
        assert_eq!(repo_name(Path::new("repo.git")).as_deref(), Some("repo.git"));
    }

    #[test]
    fn test_repo_name_none() {
        assert!(repo_name(Path::new("/")).is_none());
        assert!(repo_name(Path::new("")).is_none());
        assert!(repo_name(Path::new("a/..")).is_none());
    }

    #[test]
    fn test_assemble_counts() {
        let records = vec![
            make_record(1, true),
            make_record(2, false),
            make_record(3, true),
        ];
        let summary = RepoSummary::assemble(
            Path::new("/src/widget"),
            "gripqa",
            records,
            Diagnostics::new(),
        )
        .unwrap();

        assert_eq!(summary.repo, "widget");
        assert_eq!(summary.owner, "gripqa");
        assert_eq!(summary.total_commits, 3);
        assert_eq!(summary.defect_commits, 2);
        assert_eq!(summary.skipped_entries, 0);
        assert!(summary.defect_commits <= summary.total_commits);
    }

    #[test]
    fn test_assemble_preserves_order() {
        let records = vec![make_record(3, false), make_record(1, false), make_record(2, true)];
        let expected: Vec<_> = records.iter().map(|r| r.id.clone()).collect();

        let summary =
            RepoSummary::assemble(Path::new("repo"), "o", records, Diagnostics::new()).unwrap();
        let ids: Vec<_> = summary.commits.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_assemble_all_non_defect_is_fine() {
        let records = vec![make_record(1, false), make_record(2, false)];
        let summary =
            RepoSummary::assemble(Path::new("repo"), "o", records, Diagnostics::new()).unwrap();
        assert_eq!(summary.defect_commits, 0);
        assert_eq!(summary.total_commits, 2);
    }

    #[test]
    fn test_assemble_empty_fails() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Warning::MalformedEntry {
            position: 1,
            reason: "missing author field".to_string(),
        });

        let err = RepoSummary::assemble(Path::new("repo"), "o", Vec::new(), diagnostics)
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyRepository { skipped: 1 }));
    }

    #[test]
    fn test_assemble_unnamed_fails() {
        let err = RepoSummary::assemble(
            Path::new("/"),
            "o",
            vec![make_record(1, false)],
            Diagnostics::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::UnnamedRepository(_)));
    }

    #[test]
    fn test_assemble_reports_skipped_and_warnings() {
        let diagnostics: Diagnostics = vec![
            Warning::InvalidOverrideLine {
                line: 1,
                reason: "blank line".to_string(),
            },
            Warning::MalformedEntry {
                position: 2,
                reason: "invalid commit id".to_string(),
            },
        ]
        .into_iter()
        .collect();

        let summary = RepoSummary::assemble(
            Path::new("repo"),
            "o",
            vec![make_record(1, false)],
            diagnostics,
        )
        .unwrap();
        assert_eq!(summary.skipped_entries, 1);
        assert_eq!(summary.warnings.len(), 2);
    }

    #[test]
    fn test_json_roundtrip_preserves_records() {
        let records = vec![make_record(1, true), make_record(2, false), make_record(3, true)];
        let summary =
            RepoSummary::assemble(Path::new("repo"), "o", records, Diagnostics::new()).unwrap();

        let json = serde_json::to_string(&summary).unwrap();
        let back: RepoSummary = serde_json::from_str(&json).unwrap();

        let flags = |s: &RepoSummary| -> Vec<(String, bool)> {
            s.commits
                .iter()
                .map(|c| (c.id.to_string(), c.is_defect()))
                .collect()
        };
        assert_eq!(flags(&back), flags(&summary));
        assert_eq!(back, summary);
    }
}
