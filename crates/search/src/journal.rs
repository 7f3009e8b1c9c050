use crate::error::{Result, SearchError};
use crate::results::SearchResults;
use chrono::{DateTime, FixedOffset, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Append-only markdown journal of selected search results.
///
/// Each entry is a level-one heading with the query and a timestamp, followed
/// by the chosen sections with their headings demoted one level.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
    utc_offset_hours: i32,
}

impl SessionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }

    pub fn with_utc_offset_hours(mut self, hours: i32) -> Result<Self> {
        hours_offset(hours)?;
        self.utc_offset_hours = hours;
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the entry for `selected` without touching the file.
    /// Returns `None` when nothing is selected.
    pub fn format_entry(
        &self,
        results: &SearchResults,
        selected: &[usize],
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let picked = results.select(selected)?;
        if picked.is_empty() {
            return Ok(None);
        }

        let offset = hours_offset(self.utc_offset_hours)?;
        let timestamp = now.with_timezone(&offset).format(TIMESTAMP_FORMAT);
        let body = picked
            .iter()
            // `{:?}` keeps the decimal point on whole scores: `0.0`, not `0`.
            .map(|hit| format!("#{} ({:?})\n\n{}", hit.heading, hit.score, hit.content))
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Some(format!("\n\n# {} ({timestamp})\n\n{body}", results.query)))
    }

    /// Append the entry for `selected` and return what was written.
    pub fn append(
        &self,
        results: &SearchResults,
        selected: &[usize],
        now: DateTime<Utc>,
    ) -> Result<Option<String>> {
        let Some(entry) = self.format_entry(results, selected, now)? else {
            log::debug!("Nothing selected for {:?}; journal untouched", results.query);
            return Ok(None);
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        log::info!(
            "Logged {} result(s) for {:?} to {}",
            selected.len(),
            results.query,
            self.path.display()
        );
        Ok(Some(entry))
    }
}

fn hours_offset(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(SearchError::InvalidUtcOffset(hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use vectormd_vector_store::SearchResult;

    fn results() -> SearchResults {
        SearchResults {
            query: "open file".into(),
            hits: vec![
                SearchResult {
                    position: 0,
                    heading: "# Open a file".into(),
                    content: "File::open(path)".into(),
                    score: 0.5,
                },
                SearchResult {
                    position: 1,
                    heading: "## Close it".into(),
                    content: "drop(file)".into(),
                    score: 1.25,
                },
            ],
        }
    }

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid time")
    }

    #[test]
    fn entry_shifts_timestamp_and_demotes_headings() {
        let log = SessionLog::new("unused.md");
        let entry = log
            .format_entry(&results(), &[1, 0], noon_utc())
            .expect("format")
            .expect("entry");

        assert_eq!(
            entry,
            "\n\n# open file (2024-03-01 21:00:00.000000)\n\n\
             ### Close it (1.25)\n\ndrop(file)\n\n\
             ## Open a file (0.5)\n\nFile::open(path)"
        );
    }

    #[test]
    fn custom_offset_is_applied() {
        let log = SessionLog::new("unused.md")
            .with_utc_offset_hours(-5)
            .expect("offset");
        let entry = log
            .format_entry(&results(), &[0], noon_utc())
            .expect("format")
            .expect("entry");
        assert!(entry.contains("(2024-03-01 07:00:00.000000)"), "{entry}");
    }

    #[test]
    fn absurd_offset_is_rejected() {
        let err = SessionLog::new("unused.md")
            .with_utc_offset_hours(48)
            .expect_err("offset");
        assert!(matches!(err, SearchError::InvalidUtcOffset(48)));
    }

    #[test]
    fn whole_number_scores_keep_decimal_point() {
        let mut results = results();
        results.hits[0].score = 0.0;
        results.hits[1].score = 2.0;
        let entry = SessionLog::new("unused.md")
            .format_entry(&results, &[0, 1], noon_utc())
            .expect("format")
            .expect("entry");
        assert!(entry.contains("## Open a file (0.0)\n"), "{entry}");
        assert!(entry.contains("### Close it (2.0)\n"), "{entry}");
    }

    #[test]
    fn empty_selection_formats_nothing() {
        let log = SessionLog::new("unused.md");
        assert_eq!(log.format_entry(&results(), &[], noon_utc()).expect("format"), None);
    }
}
