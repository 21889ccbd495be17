//! Core types and configuration for bucketsweep.
//!
//! This crate provides the data structures shared by the listing, analysis
//! and reporting crates: object records, duplicate group identifiers, the
//! sweep configuration and size unit helpers.

mod config;
mod error;
mod object;
pub mod units;

pub use config::{
    DEFAULT_AGE_THRESHOLD_DAYS, OutputPaths, StorageTier, SweepConfig, SweepConfigBuilder,
};
pub use error::{ProviderError, ScanError};
pub use object::{
    ContentHash, DuplicateMembership, DuplicateRole, GroupId, ObjectRecord, file_name,
};
