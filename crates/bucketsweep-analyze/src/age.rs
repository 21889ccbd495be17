//! Age-based object analysis.
//!
//! Staleness itself is decided at listing time; this module summarizes it
//! and provides the age arithmetic the reports use.

use chrono::{DateTime, Duration, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use bucketsweep_core::{DEFAULT_AGE_THRESHOLD_DAYS, ObjectRecord};

/// Configuration for age analysis.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct AgeConfig {
    /// Reference time for age calculations (default: now).
    #[builder(default = "Utc::now()")]
    pub reference_time: DateTime<Utc>,

    /// Age in days after which an object counts as stale.
    #[builder(default = "DEFAULT_AGE_THRESHOLD_DAYS")]
    pub threshold_days: u32,
}

impl Default for AgeConfig {
    fn default() -> Self {
        Self {
            reference_time: Utc::now(),
            threshold_days: DEFAULT_AGE_THRESHOLD_DAYS,
        }
    }
}

impl AgeConfig {
    /// Create a new config builder.
    pub fn builder() -> AgeConfigBuilder {
        AgeConfigBuilder::default()
    }
}

/// An object identified by key and modification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgedObject {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    pub age_days: i64,
}

/// Results from age analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeReport {
    /// Threshold the staleness flags were computed with.
    pub threshold_days: u32,
    /// Total objects analyzed.
    pub total_objects: u64,
    /// Objects flagged stale.
    pub stale_count: u64,
    /// Total bytes of stale objects.
    pub stale_bytes: u64,
    /// Stale objects that are not part of any duplicate group.
    pub archival_candidates: u64,
    /// Average object age in whole days.
    pub average_age_days: i64,
    /// Oldest object, if any.
    pub oldest: Option<AgedObject>,
    /// Newest object, if any.
    pub newest: Option<AgedObject>,
}

impl AgeReport {
    /// Check if any stale objects were found.
    pub fn has_stale_objects(&self) -> bool {
        self.stale_count > 0
    }
}

/// Age-based object analyzer.
pub struct AgeAnalyzer {
    config: AgeConfig,
}

impl AgeAnalyzer {
    /// Create a new analyzer with default config.
    pub fn new() -> Self {
        Self {
            config: AgeConfig::default(),
        }
    }

    /// Create a new analyzer with custom config.
    pub fn with_config(config: AgeConfig) -> Self {
        Self { config }
    }

    /// Whole days elapsed since `last_modified`.
    pub fn age_days(&self, last_modified: DateTime<Utc>) -> i64 {
        (self.config.reference_time - last_modified).num_days()
    }

    /// Summarize object ages. Run after duplicate detection so that archival
    /// candidates exclude duplicate group members.
    pub fn analyze(&self, records: &[ObjectRecord]) -> AgeReport {
        let mut stale_count = 0u64;
        let mut stale_bytes = 0u64;
        let mut archival_candidates = 0u64;
        let mut total_age_days = 0i64;
        let mut oldest: Option<&ObjectRecord> = None;
        let mut newest: Option<&ObjectRecord> = None;

        for record in records {
            total_age_days += self.age_days(record.last_modified);

            if record.is_stale {
                stale_count += 1;
                stale_bytes += record.size;
                if !record.is_duplicate_member() {
                    archival_candidates += 1;
                }
            }

            if oldest.is_none_or(|o| record.last_modified < o.last_modified) {
                oldest = Some(record);
            }
            if newest.is_none_or(|n| record.last_modified > n.last_modified) {
                newest = Some(record);
            }
        }

        let total_objects = records.len() as u64;
        let average_age_days = if total_objects > 0 {
            total_age_days / total_objects as i64
        } else {
            0
        };

        AgeReport {
            threshold_days: self.config.threshold_days,
            total_objects,
            stale_count,
            stale_bytes,
            archival_candidates,
            average_age_days,
            oldest: oldest.map(|r| self.aged(r)),
            newest: newest.map(|r| self.aged(r)),
        }
    }

    fn aged(&self, record: &ObjectRecord) -> AgedObject {
        AgedObject {
            key: record.key.clone(),
            last_modified: record.last_modified,
            age_days: self.age_days(record.last_modified),
        }
    }
}

impl Default for AgeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an age as a human-readable string.
pub fn format_age(age: Duration) -> String {
    let days = age.num_days();
    if days < 1 {
        format!("{} hours", age.num_hours().max(0))
    } else if days < 30 {
        format!("{days} days")
    } else if days < 365 {
        format!("{} months", days / 30)
    } else {
        format!("{:.1} years", days as f64 / 365.0)
    }
}
