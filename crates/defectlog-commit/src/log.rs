//! Parsing of raw `git log` output.
//!
//! The log is requested with [`LOG_FORMAT`], which ends every field with
//! [`FIELD_TERMINATOR`] and starts every commit with one:
//!
//! ```text
//! <NUL>hash<NUL>author name<NUL>author email<NUL>author date<NUL>message<NUL>
//! <numstat lines>
//! ```
//!
//! Git cannot store NUL in any of these fields, while any other byte
//! (control characters included) may appear in a message. Splitting the
//! whole log on NUL therefore yields the fields of every commit in fixed
//! groups of [`FIELD_COUNT`], and a bad entry never shifts the ones after it.

use chrono::{DateTime, Utc};

use crate::{CommitId, CommitRecord, FileChange, ParseError};

/// Ends each field and starts each commit.
pub const FIELD_TERMINATOR: char = '\0';

/// `--format` argument producing the layout [`LogEntries`] expects.
pub const LOG_FORMAT: &str = "%x00%H%x00%an%x00%ae%x00%aI%x00%B%x00";

/// Fields per entry, counting the trailing numstat section.
pub const FIELD_COUNT: usize = 6;

/// A lazy, single-pass iterator over the commits in a raw log.
///
/// Borrows the log text; each item is either a parsed (unclassified)
/// record or the reason that entry is malformed. A malformed entry does not
/// stop iteration.
#[derive(Debug, Clone)]
pub struct LogEntries<'a> {
    fields: std::str::Split<'a, char>,
    preamble: Option<&'a str>,
}

impl<'a> LogEntries<'a> {
    /// Creates an iterator over the given log text.
    #[must_use]
    pub fn new(log: &'a str) -> Self {
        let mut fields = log.split(FIELD_TERMINATOR);
        let preamble = fields.next().filter(|text| !text.trim().is_empty());
        Self { fields, preamble }
    }

    /// Consumes the fields of one entry, then validates them.
    ///
    /// All fields are taken before anything is checked so that the next
    /// entry starts at its own hash.
    fn next_entry(&mut self, id: &'a str) -> Result<CommitRecord, ParseError> {
        let fields = &mut self.fields;
        let mut take = |name| fields.next().ok_or(ParseError::MissingField(name));
        let author = take("author")?;
        let email = take("email")?;
        let date = take("date")?;
        let message = take("message")?;
        let stats = self.fields.next().unwrap_or_default();

        let id = CommitId::parse(id.trim())?;
        let date = parse_date(date.trim())?;
        let files = stats.lines().filter_map(FileChange::from_numstat).collect();

        Ok(CommitRecord::new(id, author, email, date, message.trim_end()).with_files(files))
    }
}

impl Iterator for LogEntries<'_> {
    type Item = Result<CommitRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(text) = self.preamble.take() {
            return Some(Err(ParseError::UnexpectedText(text.trim().to_string())));
        }

        let id = self.fields.next()?;
        Some(self.next_entry(id))
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|e| ParseError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const HASH_A: &str = "1111111111111111111111111111111111111111";
    const HASH_B: &str = "2222222222222222222222222222222222222222";
    const HASH_C: &str = "3333333333333333333333333333333333333333";
    const DATE: &str = "2015-06-01T14:00:00+02:00";
    const NUL: char = FIELD_TERMINATOR;

    /// Renders one entry the way `git log --numstat --format=LOG_FORMAT` does.
    fn entry(hash: &str, message: &str, stats: &str) -> String {
        format!(
            "{NUL}{hash}{NUL}Test Author{NUL}test@example.com{NUL}{DATE}{NUL}{message}\n{NUL}\n\n{stats}"
        )
    }

    #[test]
    fn test_log_format_matches_terminator() {
        assert!(LOG_FORMAT.starts_with("%x00"));
        assert!(LOG_FORMAT.ends_with("%x00"));
        assert_eq!(LOG_FORMAT.matches("%x00").count(), FIELD_COUNT);
        assert_eq!(u32::from(FIELD_TERMINATOR), 0);
    }

    #[test]
    fn test_empty_log() {
        assert_eq!(LogEntries::new("").count(), 0);
        assert_eq!(LogEntries::new("\n\n").count(), 0);
    }

    #[test]
    fn test_single_entry() {
        let log = entry(HASH_A, "Fix parser\n\nLonger body", "3\t1\tsrc/parser.rs\n");
        let records: Vec<_> = LogEntries::new(&log).collect();
        assert_eq!(records.len(), 1);

        let record = records[0].as_ref().unwrap();
        assert_eq!(record.id.as_str(), HASH_A);
        assert_eq!(record.author, "Test Author");
        assert_eq!(record.email, "test@example.com");
        assert_eq!(
            record.date,
            Utc.with_ymd_and_hms(2015, 6, 1, 12, 0, 0).unwrap()
        );
        assert_eq!(record.message, "Fix parser\n\nLonger body");
        assert_eq!(record.files.len(), 1);
        assert_eq!(record.files[0].path, "src/parser.rs");
        assert!(!record.is_defect());
    }

    #[test]
    fn test_preserves_order() {
        let log = [
            entry(HASH_A, "first", ""),
            entry(HASH_B, "second", "1\t0\ta\n"),
            entry(HASH_C, "third", ""),
        ]
        .concat();

        let ids: Vec<_> = LogEntries::new(&log)
            .map(|r| r.unwrap().id.to_string())
            .collect();
        assert_eq!(ids, vec![HASH_A, HASH_B, HASH_C]);
    }

    #[test]
    fn test_entry_without_files() {
        let log = format!("{NUL}{HASH_A}{NUL}A{NUL}a@b{NUL}{DATE}{NUL}Merge branch 'x'\n{NUL}\n");
        let record = LogEntries::new(&log).next().unwrap().unwrap();
        assert!(record.files.is_empty());
        assert_eq!(record.message, "Merge branch 'x'");
    }

    #[test]
    fn test_message_with_tabs_is_not_a_file() {
        let log = entry(HASH_A, "1\t2\tlooks like numstat", "");
        let record = LogEntries::new(&log).next().unwrap().unwrap();
        assert!(record.files.is_empty());
        assert_eq!(record.message, "1\t2\tlooks like numstat");
    }

    #[test]
    fn test_message_with_control_characters() {
        let log = [
            entry(HASH_A, "Add table\u{1e}column export fix", "1\t0\ta\n"),
            entry(HASH_B, "Tidy\u{1f}bugfix in loader", ""),
        ]
        .concat();

        let records: Vec<_> = LogEntries::new(&log).map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "Add table\u{1e}column export fix");
        assert_eq!(records[0].files.len(), 1);
        assert_eq!(records[1].message, "Tidy\u{1f}bugfix in loader");
    }

    #[test]
    fn test_truncated_id_is_skipped() {
        let log = [
            entry(HASH_A, "first", ""),
            entry(&HASH_B[..39], "broken", "1\t1\tb\n"),
            entry(HASH_C, "third", ""),
        ]
        .concat();

        let results: Vec<_> = LogEntries::new(&log).collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ParseError::InvalidId(_))));
        assert_eq!(results[2].as_ref().unwrap().id.as_str(), HASH_C);
    }

    #[test]
    fn test_invalid_date_keeps_following_entries() {
        let log = [
            format!("{NUL}{HASH_A}{NUL}A{NUL}a@b{NUL}Mon Jun 1 2015{NUL}msg{NUL}\n"),
            entry(HASH_B, "second", ""),
        ]
        .concat();

        let results: Vec<_> = LogEntries::new(&log).collect();
        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(ParseError::InvalidDate { .. })));
        assert_eq!(results[1].as_ref().unwrap().id.as_str(), HASH_B);
    }

    #[test]
    fn test_missing_fields() {
        let log = format!("{NUL}{HASH_A}{NUL}Author only");
        let mut entries = LogEntries::new(&log);
        assert_eq!(
            entries.next().unwrap().unwrap_err(),
            ParseError::MissingField("email")
        );
        assert!(entries.next().is_none());

        let log = format!("{NUL}{HASH_A}{NUL}A{NUL}a@b{NUL}{DATE}");
        let result = LogEntries::new(&log).next().unwrap();
        assert_eq!(result.unwrap_err(), ParseError::MissingField("message"));
    }

    #[test]
    fn test_leading_text_is_malformed() {
        let log = format!("warning: something\n{}", entry(HASH_A, "msg", ""));
        let results: Vec<_> = LogEntries::new(&log).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            Err(ParseError::UnexpectedText("warning: something".to_string()))
        );
        assert!(results[1].is_ok());
    }
}
