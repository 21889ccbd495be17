//! Report generation for bucketsweep.
//!
//! Two artifacts are produced per run:
//!
//! - **Record report** - a CSV listing every duplicate copy, then every stale
//!   object that is not part of a duplicate group
//! - **Cost report** - a plain-text summary of scanned, duplicate and
//!   remaining size with the projected monthly cost in each storage tier
//!
//! ```rust,ignore
//! use bucketsweep_report::{ScanSummary, render_cost_report, write_record_report_file};
//!
//! write_record_report_file(&config.outputs.csv, &records, now)?;
//!
//! let summary = ScanSummary::new(listing.total_gb(), duplicates.duplicate_size_gb);
//! let costs = summary.project_costs(&config.tiers);
//! println!("{}", render_cost_report(&summary, &costs));
//! ```

mod document;
mod error;
mod record_report;
mod summary;

pub use document::SweepDocument;
pub use error::ReportError;
pub use record_report::{
    DUPLICATE_SECTION, DUPLICATE_STATUS, OLD_SECTION, OLD_STATUS, ReportSections, RowCounts,
    write_record_report, write_record_report_file,
};
pub use summary::{ScanSummary, TierCost, render_cost_report, write_cost_report};
