//! Analysis algorithms for bucketsweep.
//!
//! This crate classifies listed objects:
//!
//! - **Duplicate detection** - Group objects by name, size and content hash
//! - **Age analysis** - Summarize stale objects and object ages
//!
//! # Duplicate Detection
//!
//! No object data is read; grouping uses listing metadata only.
//!
//! ```rust,ignore
//! use bucketsweep_analyze::DuplicateFinder;
//!
//! let mut records = listing.records;
//! let report = DuplicateFinder::new().find_duplicates(&mut records);
//!
//! println!("Found {} duplicate groups", report.group_count);
//! println!("Duplicate size: {} GB", report.duplicate_size_gb);
//! ```
//!
//! # Age Analysis
//!
//! ```rust,ignore
//! use bucketsweep_analyze::{AgeAnalyzer, AgeConfig};
//!
//! let config = AgeConfig::builder().threshold_days(365u32).build().unwrap();
//! let report = AgeAnalyzer::with_config(config).analyze(&records);
//!
//! println!("{} stale objects", report.stale_count);
//! ```

pub mod age;
mod duplicates;

pub use age::{AgeAnalyzer, AgeConfig, AgeReport, AgedObject, format_age};
pub use duplicates::{DuplicateConfig, DuplicateFinder, DuplicateGroup, DuplicateReport};

// Re-export core types
pub use bucketsweep_core::{ContentHash, DuplicateRole, GroupId, ObjectRecord};
