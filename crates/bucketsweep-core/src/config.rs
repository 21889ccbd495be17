//! Sweep configuration types.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default age (in days) after which an object counts as stale.
pub const DEFAULT_AGE_THRESHOLD_DAYS: u32 = 1000;

/// A storage class and its monthly price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTier {
    /// Display name of the tier.
    pub name: String,
    /// Price in USD per GB-month.
    pub price: f64,
}

impl StorageTier {
    /// Create a new storage tier.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// The seven standard S3 storage classes with their list prices.
    pub fn default_table() -> Vec<StorageTier> {
        vec![
            StorageTier::new("S3 Standard", 0.023),
            StorageTier::new("S3 Intelligent-Tiering", 0.023),
            StorageTier::new("S3 Standard-IA", 0.0125),
            StorageTier::new("S3 One Zone-IA", 0.01),
            StorageTier::new("S3 Glacier Instant Retrieval", 0.004),
            StorageTier::new("S3 Glacier Flexible Retrieval", 0.0036),
            StorageTier::new("S3 Glacier Deep Archive", 0.00099),
        ]
    }
}

/// Where the generated reports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPaths {
    /// Record-level CSV report.
    #[serde(default = "default_csv_path")]
    pub csv: PathBuf,
    /// Plain-text storage cost summary.
    #[serde(default = "default_cost_report_path")]
    pub cost_report: PathBuf,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("file_analysis_report.csv")
}

fn default_cost_report_path() -> PathBuf {
    PathBuf::from("storage_cost_report.txt")
}

fn default_age_threshold_days() -> u32 {
    DEFAULT_AGE_THRESHOLD_DAYS
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            csv: default_csv_path(),
            cost_report: default_cost_report_path(),
        }
    }
}

/// Configuration for a single sweep of one bucket prefix.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct SweepConfig {
    /// Bucket to list.
    pub bucket: String,

    /// Key prefix to list under (empty = whole bucket).
    #[builder(default)]
    #[serde(default)]
    pub prefix: String,

    /// Objects older than this many days are flagged as stale.
    #[builder(default = "DEFAULT_AGE_THRESHOLD_DAYS")]
    #[serde(default = "default_age_threshold_days")]
    pub age_threshold_days: u32,

    /// Report output locations.
    #[builder(default)]
    #[serde(default)]
    pub outputs: OutputPaths,

    /// Storage tiers used for the cost projection, in display order.
    #[builder(default = "StorageTier::default_table()")]
    #[serde(default = "StorageTier::default_table")]
    pub tiers: Vec<StorageTier>,
}

impl SweepConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.bucket {
            Some(ref bucket) if bucket.trim().is_empty() => {
                return Err("Bucket name cannot be empty".to_string());
            }
            None => return Err("Bucket name is required".to_string()),
            _ => {}
        }
        if let Some(ref tiers) = self.tiers {
            validate_tiers(tiers)?;
        }
        Ok(())
    }
}

fn validate_tiers(tiers: &[StorageTier]) -> Result<(), String> {
    if tiers.is_empty() {
        return Err("At least one storage tier is required".to_string());
    }
    for tier in tiers {
        if !tier.price.is_finite() || tier.price < 0.0 {
            return Err(format!("Invalid price for tier '{}': {}", tier.name, tier.price));
        }
    }
    Ok(())
}

impl SweepConfig {
    /// Create a new sweep config builder.
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Create a config for a bucket with all defaults.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: String::new(),
            age_threshold_days: DEFAULT_AGE_THRESHOLD_DAYS,
            outputs: OutputPaths::default(),
            tiers: StorageTier::default_table(),
        }
    }

    /// Check the invariants the builder enforces, for configs built by hand
    /// or deserialized.
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("Bucket name cannot be empty".to_string());
        }
        validate_tiers(&self.tiers)
    }

    /// Instant before which (inclusive) objects are stale.
    pub fn stale_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.age_threshold_days))
    }

    /// Check if an object modified at `last_modified` is stale as of `now`.
    pub fn is_stale(&self, last_modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        last_modified <= self.stale_cutoff(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_config_builder() {
        let config = SweepConfig::builder()
            .bucket("archive")
            .prefix("logs/")
            .age_threshold_days(30u32)
            .build()
            .unwrap();

        assert_eq!(config.bucket, "archive");
        assert_eq!(config.prefix, "logs/");
        assert_eq!(config.age_threshold_days, 30);
        assert_eq!(config.tiers.len(), 7);
        assert_eq!(config.outputs, OutputPaths::default());
    }

    #[test]
    fn test_builder_requires_bucket() {
        assert!(SweepConfig::builder().build().is_err());
        assert!(SweepConfig::builder().bucket("  ").build().is_err());
    }

    #[test]
    fn test_builder_rejects_bad_tiers() {
        let empty = SweepConfig::builder().bucket("b").tiers(Vec::new()).build();
        assert!(empty.is_err());

        let negative = SweepConfig::builder()
            .bucket("b")
            .tiers(vec![StorageTier::new("Cheap", -0.1)])
            .build();
        assert!(negative.is_err());
    }

    #[test]
    fn test_default_tier_order() {
        let tiers = StorageTier::default_table();
        assert_eq!(tiers[0].name, "S3 Standard");
        assert_eq!(tiers[6].name, "S3 Glacier Deep Archive");
        assert_eq!(tiers[6].price, 0.00099);
    }

    #[test]
    fn test_is_stale_boundary() {
        let config = SweepConfig::builder()
            .bucket("b")
            .age_threshold_days(10u32)
            .build()
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 11, 12, 0, 0).unwrap();

        assert!(config.is_stale(now - Duration::days(10), now));
        assert!(config.is_stale(now - Duration::days(400), now));
        assert!(!config.is_stale(now - Duration::days(10) + Duration::seconds(1), now));
        assert!(!config.is_stale(now, now));
    }
}
