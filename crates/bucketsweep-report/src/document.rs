//! Machine-readable run document.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bucketsweep_analyze::{AgeReport, DuplicateReport};

use crate::summary::{ScanSummary, TierCost};

/// Everything a run produced, serialized as one JSON document.
#[derive(Debug, Serialize)]
pub struct SweepDocument<'a> {
    pub bucket: &'a str,
    pub prefix: &'a str,
    pub generated_at: DateTime<Utc>,
    pub objects_scanned: usize,
    pub summary: ScanSummary,
    pub costs: &'a [TierCost],
    pub duplicates: &'a DuplicateReport,
    pub age: &'a AgeReport,
}
