//! Record-level CSV report.
//!
//! Layout: header row, a `=== DUPLICATE FILES ===` sentinel followed by every
//! duplicate copy, then a `=== OLD FILES ===` sentinel followed by every stale
//! object that belongs to no duplicate group.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use bucketsweep_core::ObjectRecord;

use crate::error::ReportError;

pub const DUPLICATE_SECTION: &str = "=== DUPLICATE FILES ===";
pub const OLD_SECTION: &str = "=== OLD FILES ===";
pub const DUPLICATE_STATUS: &str = "Can be deleted";
pub const OLD_STATUS: &str = "Review for archival";

/// Records selected for each report section, in output order.
#[derive(Debug, Clone, Default)]
pub struct ReportSections<'a> {
    /// Duplicate copies, ordered by group id.
    pub duplicates: Vec<&'a ObjectRecord>,
    /// Stale objects outside any duplicate group, oldest first.
    pub old: Vec<&'a ObjectRecord>,
}

impl<'a> ReportSections<'a> {
    /// Pick and order the rows of both sections.
    pub fn select(records: &'a [ObjectRecord]) -> Self {
        let mut duplicates: Vec<_> = records.iter().filter(|r| r.is_duplicate_copy()).collect();
        duplicates.sort_by_key(|r| r.group_id());

        let mut old: Vec<_> = records
            .iter()
            .filter(|r| r.is_stale && !r.is_duplicate_member())
            .collect();
        old.sort_by_key(|r| r.last_modified);

        Self { duplicates, old }
    }
}

/// One CSV row. Sentinel rows only fill `Type`.
#[derive(Debug, Default, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "FileName")]
    file_name: Option<&'a str>,
    #[serde(rename = "Size_MB")]
    size_mb: Option<String>,
    #[serde(rename = "LastModified")]
    last_modified: Option<String>,
    #[serde(rename = "AgeDays")]
    age_days: Option<i64>,
    #[serde(rename = "Path")]
    path: Option<&'a str>,
    #[serde(rename = "DuplicateGroupID")]
    group_id: Option<String>,
    #[serde(rename = "Status")]
    status: Option<&'a str>,
}

impl<'a> ReportRow<'a> {
    fn sentinel(label: &'a str) -> Self {
        Self {
            kind: label,
            ..Self::default()
        }
    }

    fn object(kind: &'a str, record: &'a ObjectRecord, now: DateTime<Utc>, status: &'a str) -> Self {
        Self {
            kind,
            file_name: Some(record.name.as_str()),
            size_mb: Some(format!("{:.2}", record.size_mb())),
            last_modified: Some(record.last_modified.format("%Y-%m-%d").to_string()),
            age_days: Some(record.age_days(now)),
            path: Some(record.key.as_str()),
            group_id: record.group_id().map(|id| id.to_string()),
            status: Some(status),
        }
    }
}

/// Number of object rows written per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCounts {
    pub duplicates: usize,
    pub old: usize,
}

/// Write the CSV report for `records` to any writer.
pub fn write_record_report<W: io::Write>(
    writer: W,
    records: &[ObjectRecord],
    now: DateTime<Utc>,
) -> Result<RowCounts, csv::Error> {
    let sections = ReportSections::select(records);
    let mut out = csv::Writer::from_writer(writer);

    out.serialize(ReportRow::sentinel(DUPLICATE_SECTION))?;
    for record in &sections.duplicates {
        out.serialize(ReportRow::object("Duplicate", record, now, DUPLICATE_STATUS))?;
    }

    out.serialize(ReportRow::sentinel(OLD_SECTION))?;
    for record in &sections.old {
        out.serialize(ReportRow::object("Old", record, now, OLD_STATUS))?;
    }

    out.flush()?;

    Ok(RowCounts {
        duplicates: sections.duplicates.len(),
        old: sections.old.len(),
    })
}

/// Write the CSV report to a file, replacing it if it exists.
pub fn write_record_report_file(
    path: &Path,
    records: &[ObjectRecord],
    now: DateTime<Utc>,
) -> Result<RowCounts, ReportError> {
    let file = std::fs::File::create(path).map_err(|e| ReportError::io(path, e))?;
    write_record_report(file, records, now).map_err(|e| ReportError::csv(path, e))
}
