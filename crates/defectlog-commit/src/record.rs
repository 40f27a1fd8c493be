//! Commit records and their defect classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CommitId;

/// Where a commit's defect classification came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationSource {
    /// A message heuristic matched.
    Heuristic,
    /// The commit is listed in the override file.
    Override,
    /// Nothing marked the commit as a defect fix.
    #[default]
    None,
}

impl ClassificationSource {
    /// Returns the lowercase label used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Override => "override",
            Self::None => "none",
        }
    }
}

/// The defect verdict for a commit.
///
/// `is_defect` is true exactly when the source is not
/// [`ClassificationSource::None`]; the constructors are the only way to
/// build one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    is_defect: bool,
    source: ClassificationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

impl Classification {
    /// Not a defect fix.
    #[must_use]
    pub fn unclassified() -> Self {
        Self::default()
    }

    /// A defect fix listed in the override file.
    #[must_use]
    pub fn overridden() -> Self {
        Self {
            is_defect: true,
            source: ClassificationSource::Override,
            rule: None,
        }
    }

    /// A defect fix detected by the named heuristic rule.
    #[must_use]
    pub fn heuristic(rule: impl Into<String>) -> Self {
        Self {
            is_defect: true,
            source: ClassificationSource::Heuristic,
            rule: Some(rule.into()),
        }
    }

    /// Returns true if the commit fixes a defect.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        self.is_defect
    }

    /// Returns the classification source.
    #[must_use]
    pub fn source(&self) -> ClassificationSource {
        self.source
    }

    /// Returns the matching heuristic rule, if any.
    #[must_use]
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }
}

/// Lines changed in one file by a commit, from `git log --numstat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the file, as git prints it.
    pub path: String,

    /// Lines added; `None` for binary files.
    pub added: Option<u64>,

    /// Lines deleted; `None` for binary files.
    pub deleted: Option<u64>,
}

impl FileChange {
    /// Parses a numstat line (`added<TAB>deleted<TAB>path`).
    ///
    /// Returns `None` if the line does not have that shape.
    #[must_use]
    pub fn from_numstat(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, '\t');
        let added = parse_count(parts.next()?)?;
        let deleted = parse_count(parts.next()?)?;
        let path = parts.next()?.trim_end();
        if path.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_string(),
            added,
            deleted,
        })
    }

    /// Returns true if git reported no line counts for the file.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.added.is_none() && self.deleted.is_none()
    }
}

/// `-` means binary, anything else must be a number.
fn parse_count(value: &str) -> Option<Option<u64>> {
    if value == "-" {
        Some(None)
    } else {
        value.parse().ok().map(Some)
    }
}

/// A commit as read from the log, together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The full commit hash.
    pub id: CommitId,

    /// The commit author name.
    pub author: String,

    /// The commit author email.
    pub email: String,

    /// The author date.
    pub date: DateTime<Utc>,

    /// The full commit message (subject + body).
    pub message: String,

    #[serde(flatten)]
    classification: Classification,

    /// Files touched by the commit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileChange>,
}

impl CommitRecord {
    /// Creates a new, unclassified record.
    #[must_use]
    pub fn new(
        id: CommitId,
        author: impl Into<String>,
        email: impl Into<String>,
        date: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            email: email.into(),
            date,
            message: message.into(),
            classification: Classification::unclassified(),
            files: Vec::new(),
        }
    }

    /// Sets the changed files.
    #[must_use]
    pub fn with_files(mut self, files: Vec<FileChange>) -> Self {
        self.files = files;
        self
    }

    /// Returns the first line of the commit message (the subject).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns the current classification.
    #[must_use]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Replaces the classification.
    pub fn classify(&mut self, classification: Classification) {
        self.classification = classification;
    }

    /// Returns true if the commit is classified as a defect fix.
    #[must_use]
    pub fn is_defect(&self) -> bool {
        self.classification.is_defect()
    }

    /// Returns the classification source.
    #[must_use]
    pub fn source(&self) -> ClassificationSource {
        self.classification.source()
    }

    /// Total lines added across non-binary files.
    #[must_use]
    pub fn lines_added(&self) -> u64 {
        self.files.iter().filter_map(|f| f.added).sum()
    }

    /// Total lines deleted across non-binary files.
    #[must_use]
    pub fn lines_deleted(&self) -> u64 {
        self.files.iter().filter_map(|f| f.deleted).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    fn make_record(message: &str) -> CommitRecord {
        CommitRecord::new(
            CommitId::parse(HASH).unwrap(),
            "Test Author",
            "test@example.com",
            Utc.with_ymd_and_hms(2015, 6, 1, 12, 0, 0).unwrap(),
            message,
        )
    }

    #[test]
    fn test_new_is_unclassified() {
        let record = make_record("message");
        assert!(!record.is_defect());
        assert_eq!(record.source(), ClassificationSource::None);
        assert!(record.classification().rule().is_none());
    }

    #[test]
    fn test_classify_heuristic() {
        let mut record = make_record("fix crash");
        record.classify(Classification::heuristic("fix"));
        assert!(record.is_defect());
        assert_eq!(record.source(), ClassificationSource::Heuristic);
        assert_eq!(record.classification().rule(), Some("fix"));
    }

    #[test]
    fn test_classify_override() {
        let mut record = make_record("refactor");
        record.classify(Classification::overridden());
        assert!(record.is_defect());
        assert_eq!(record.source(), ClassificationSource::Override);
        assert!(record.classification().rule().is_none());
    }

    #[test]
    fn test_subject() {
        let record = make_record("Fix parser\n\nLonger explanation");
        assert_eq!(record.subject(), "Fix parser");
    }

    #[test]
    fn test_subject_empty() {
        let record = make_record("");
        assert_eq!(record.subject(), "");
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(ClassificationSource::Heuristic.as_str(), "heuristic");
        assert_eq!(ClassificationSource::Override.as_str(), "override");
        assert_eq!(ClassificationSource::None.as_str(), "none");
    }

    #[test]
    fn test_numstat_text_file() {
        let change = FileChange::from_numstat("12\t3\tsrc/main.rs").unwrap();
        assert_eq!(change.path, "src/main.rs");
        assert_eq!(change.added, Some(12));
        assert_eq!(change.deleted, Some(3));
        assert!(!change.is_binary());
    }

    #[test]
    fn test_numstat_binary_file() {
        let change = FileChange::from_numstat("-\t-\tlogo.png").unwrap();
        assert!(change.is_binary());
    }

    #[test]
    fn test_numstat_path_with_spaces() {
        let change = FileChange::from_numstat("1\t0\tdocs/read me.md").unwrap();
        assert_eq!(change.path, "docs/read me.md");
    }

    #[test]
    fn test_numstat_rejects_other_lines() {
        assert!(FileChange::from_numstat("").is_none());
        assert!(FileChange::from_numstat("Fix the thing").is_none());
        assert!(FileChange::from_numstat("1\tx\tpath").is_none());
        assert!(FileChange::from_numstat("1\t2\t").is_none());
    }

    #[test]
    fn test_line_totals_skip_binary() {
        let record = make_record("msg").with_files(vec![
            FileChange::from_numstat("10\t2\ta.rs").unwrap(),
            FileChange::from_numstat("-\t-\tb.png").unwrap(),
            FileChange::from_numstat("5\t1\tc.rs").unwrap(),
        ]);
        assert_eq!(record.lines_added(), 15);
        assert_eq!(record.lines_deleted(), 3);
    }

    #[test]
    fn test_json_shape() {
        let mut record = make_record("fix: crash");
        record.classify(Classification::heuristic("fix"));
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["id"], HASH);
        assert_eq!(value["is_defect"], true);
        assert_eq!(value["source"], "heuristic");
        assert_eq!(value["rule"], "fix");
        assert!(value.get("files").is_none());
    }

    #[test]
    fn test_serialize_deserialize() {
        let mut record = make_record("Refactor imports")
            .with_files(vec![FileChange::from_numstat("1\t1\tlib.rs").unwrap()]);
        record.classify(Classification::overridden());

        let json = serde_json::to_string(&record).unwrap();
        let back: CommitRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
