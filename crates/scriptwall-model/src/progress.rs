use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Why today's page index could not be computed.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The screenplay produced zero pages; there is nothing to rotate through.
    #[error("screenplay produced zero pages, nothing to rotate through")]
    EmptyContent,
}

/// Per-slug rotation anchor: the date the rotation started.
///
/// Created once on the first run for a slug and read back unchanged on every
/// later run. Mutating `start_date` after creation would make the rotation
/// schedule jump discontinuously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub slug: String,
    pub start_date: NaiveDate,
}

impl ProgressRecord {
    /// Today's page index for this record: `(today - start_date) mod page_count`.
    pub fn page_index(&self, today: NaiveDate, page_count: usize) -> Result<usize, ScheduleError> {
        current_page_index(self.start_date, today, page_count)
    }
}

/// `(today - start_date).days mod page_count`, at calendar-date granularity.
///
/// Pure: the same inputs always yield the same index, and the index is
/// always in `[0, page_count)`. A `today` before `start_date` (clock moved
/// backwards, record copied between machines) clamps to elapsed day zero.
pub fn current_page_index(
    start_date: NaiveDate,
    today: NaiveDate,
    page_count: usize,
) -> Result<usize, ScheduleError> {
    if page_count == 0 {
        return Err(ScheduleError::EmptyContent);
    }

    let days = (today - start_date).num_days().max(0) as u64;
    Ok((days % page_count as u64) as usize)
}

/// Load the progress record at `meta_path`, creating it with `today` as the
/// start date on the first run for this slug.
///
/// An existing record is returned as-is. A record that exists but cannot be
/// read or parsed is logged and recreated with `today`.
pub fn get_or_create(meta_path: &Path, slug: &str, today: NaiveDate) -> Result<ProgressRecord> {
    if meta_path.exists() {
        let parsed = fs::read_to_string(meta_path)
            .map_err(anyhow::Error::from)
            .and_then(|s| serde_json::from_str::<ProgressRecord>(&s).map_err(anyhow::Error::from));
        match parsed {
            Ok(record) => {
                tracing::debug!(
                    path = %meta_path.display(),
                    start_date = %record.start_date,
                    "Loaded progress record"
                );
                return Ok(record);
            }
            Err(e) => {
                tracing::warn!(
                    path = %meta_path.display(),
                    error = %e,
                    "Progress record unreadable, recreating"
                );
            }
        }
    }

    let record = ProgressRecord {
        slug: slug.to_string(),
        start_date: today,
    };
    if let Some(parent) = meta_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&record)?;
    fs::write(meta_path, &json)
        .with_context(|| format!("write progress record {}", meta_path.display()))?;
    tracing::info!(
        path = %meta_path.display(),
        start_date = %record.start_date,
        "Created progress record"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_index_progression() {
        let start = d(2026, 8, 1);
        assert_eq!(current_page_index(start, d(2026, 8, 1), 3).unwrap(), 0);
        assert_eq!(current_page_index(start, d(2026, 8, 2), 3).unwrap(), 1);
        assert_eq!(current_page_index(start, d(2026, 8, 3), 3).unwrap(), 2);
        // day 4: 4 mod 3
        assert_eq!(current_page_index(start, d(2026, 8, 5), 3).unwrap(), 1);
    }

    #[test]
    fn test_index_always_in_range() {
        let start = d(2024, 1, 1);
        for offset in 0..400u64 {
            let today = start + chrono::Days::new(offset);
            let idx = current_page_index(start, today, 7).unwrap();
            assert!(idx < 7);
        }
    }

    #[test]
    fn test_today_before_start_clamps_to_zero() {
        let start = d(2026, 8, 10);
        assert_eq!(current_page_index(start, d(2026, 8, 3), 5).unwrap(), 0);
    }

    #[test]
    fn test_zero_pages_is_empty_content() {
        let start = d(2026, 8, 1);
        let err = current_page_index(start, d(2026, 8, 2), 0).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyContent));
    }

    #[test]
    fn test_get_or_create_persists_first_run_date() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join("meta.json");

        let first = get_or_create(&meta, "pulp_fiction", d(2026, 8, 7)).unwrap();
        assert_eq!(first.slug, "pulp_fiction");
        assert_eq!(first.start_date, d(2026, 8, 7));

        // A later run, a month on, reads back the original start date.
        let later = get_or_create(&meta, "pulp_fiction", d(2026, 9, 7)).unwrap();
        assert_eq!(later, first);
    }

    #[test]
    fn test_get_or_create_recreates_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join("meta.json");
        fs::write(&meta, "{ not json").unwrap();

        let record = get_or_create(&meta, "godfather", d(2026, 8, 7)).unwrap();
        assert_eq!(record.start_date, d(2026, 8, 7));

        // The rewritten file now round-trips.
        let reread = get_or_create(&meta, "godfather", d(2026, 8, 20)).unwrap();
        assert_eq!(reread, record);
    }

    #[test]
    fn test_record_json_shape() {
        let record = ProgressRecord {
            slug: "chinatown".into(),
            start_date: d(2026, 8, 7),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"start_date\":\"2026-08-07\""));
        let parsed: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
