//! Bucket listing engine for bucketsweep.
//!
//! This crate walks an object-storage bucket through the provider's
//! paginated listing API and materializes [`ObjectRecord`]s.
//!
//! # Overview
//!
//! - **[`ObjectSource`]** - one page of listing results per call
//! - **[`S3Source`]** - the AWS SDK implementation, also usable against
//!   S3-compatible stores via a custom endpoint
//! - **[`ListingCursor`]** - lazy, one-pass page sequence
//! - **[`BucketScanner`]** - drains the cursor into a [`Listing`]
//!
//! Directory marker keys (ending in `/`) are skipped, and every record is
//! flagged stale or not at listing time.
//!
//! # Example
//!
//! ```rust,no_run
//! use bucketsweep_scan::{BucketScanner, S3Options, S3Source, SweepConfig};
//!
//! # async fn run() -> Result<(), bucketsweep_scan::ScanError> {
//! let config = SweepConfig::new("my-bucket");
//! let source = S3Source::connect(&S3Options::default()).await;
//! let scanner = BucketScanner::new(source);
//! let listing = scanner.scan(&config, chrono::Utc::now()).await?;
//!
//! println!("{} objects, {} GB", listing.len(), listing.total_gb());
//! # Ok(())
//! # }
//! ```

mod progress;
mod s3;
mod scanner;
mod source;

pub use progress::ScanProgress;
pub use s3::{MAX_PAGE_SIZE, S3Options, S3Source};
pub use scanner::{BucketScanner, Listing, ListingCursor};
pub use source::{ObjectPage, ObjectSource, PageRequest, RawObject};

// Re-export core types for convenience
pub use bucketsweep_core::{ContentHash, ObjectRecord, ScanError, SweepConfig};
