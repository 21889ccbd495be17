//! Duplicate object detection.
//!
//! Objects are grouped by a key built from provider metadata only:
//! 1. File name (lowercased unless configured otherwise)
//! 2. Size in megabytes, rounded to two decimals
//! 3. Content hash (ETag)
//!
//! Within a group the object with the shortest key is kept as the original
//! (ties go to the oldest); every other member is a deletable copy.

use std::cmp::Ordering;

use compact_str::CompactString;
use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bucketsweep_core::units::{mb_hundredths, round2};
use bucketsweep_core::{
    ContentHash, DuplicateMembership, DuplicateRole, GroupId, ObjectRecord,
};

/// Configuration for duplicate detection.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into))]
pub struct DuplicateConfig {
    /// Compare file names case-insensitively.
    #[builder(default = "true")]
    pub ignore_case: bool,

    /// Skip objects the provider returned without a content hash.
    #[builder(default = "false")]
    pub require_hash: bool,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            ignore_case: true,
            require_hash: false,
        }
    }
}

impl DuplicateConfig {
    /// Create a new config builder.
    pub fn builder() -> DuplicateConfigBuilder {
        DuplicateConfigBuilder::default()
    }
}

/// A group of objects considered identical copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Sequential group identifier.
    pub id: GroupId,

    /// File name shared by the group (as compared).
    pub name: CompactString,

    /// Size of each member in megabytes (rounded).
    pub size_mb: f64,

    /// Content hash shared by all members.
    pub hash: ContentHash,

    /// Member keys, original first.
    pub paths: Vec<String>,

    /// Megabytes held by the copies: size_mb * (count - 1).
    pub wasted_mb: f64,
}

impl DuplicateGroup {
    /// Get the number of objects in the group.
    pub fn count(&self) -> usize {
        self.paths.len()
    }

    /// Number of copies that could be deleted while keeping the original.
    pub fn deletable_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Key of the object that is kept.
    pub fn original(&self) -> &str {
        &self.paths[0]
    }

    /// Keys of the deletable copies.
    pub fn copies(&self) -> &[String] {
        &self.paths[1..]
    }
}

/// Results from duplicate analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// Duplicate groups in id order.
    pub groups: Vec<DuplicateGroup>,

    /// Size of all copies in gigabytes, rounded to two decimals.
    pub duplicate_size_gb: f64,

    /// Number of objects analyzed.
    pub objects_analyzed: u64,

    /// Number of objects flagged as copies.
    pub copy_count: u64,

    /// Number of duplicate groups.
    pub group_count: usize,
}

impl DuplicateReport {
    /// Check if any duplicates were found.
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    /// Get total number of objects across all groups (originals included).
    pub fn total_duplicate_objects(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }
}

/// Identity used to decide whether two objects are copies of each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DuplicateKey {
    name: CompactString,
    size_mb_hundredths: u64,
    hash: ContentHash,
}

/// Duplicate object finder.
pub struct DuplicateFinder {
    config: DuplicateConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with default config.
    pub fn new() -> Self {
        Self {
            config: DuplicateConfig::default(),
        }
    }

    /// Create a new duplicate finder with custom config.
    pub fn with_config(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Group the records, annotate each member in place and summarize.
    ///
    /// Group ids are assigned in the order each key is first seen in
    /// `records`, so the same listing order always yields the same ids.
    pub fn find_duplicates(&self, records: &mut [ObjectRecord]) -> DuplicateReport {
        for record in records.iter_mut() {
            record.duplicate = None;
        }

        let mut by_key: IndexMap<DuplicateKey, Vec<usize>> = IndexMap::new();
        for (index, record) in records.iter().enumerate() {
            if self.config.require_hash && record.content_hash.is_empty() {
                continue;
            }
            by_key.entry(self.key_for(record)).or_default().push(index);
        }

        let mut groups = Vec::new();
        let mut duplicate_size_gb = 0.0;
        let mut copy_count = 0u64;

        for (key, mut members) in by_key {
            if members.len() < 2 {
                continue;
            }

            // Stable sort keeps listing order for full ties
            members.sort_by(|&a, &b| original_order(&records[a], &records[b]));

            let id = GroupId::new(groups.len() as u32 + 1);
            let mut wasted_mb = 0.0;

            for (position, &index) in members.iter().enumerate() {
                let role = if position == 0 {
                    DuplicateRole::Original
                } else {
                    DuplicateRole::Copy
                };
                let record = &mut records[index];
                record.duplicate = Some(DuplicateMembership { group: id, role });

                if role == DuplicateRole::Copy {
                    let size_mb = record.size_mb();
                    wasted_mb += size_mb;
                    duplicate_size_gb += size_mb / 1024.0;
                    copy_count += 1;
                }
            }

            let paths: Vec<String> = members.iter().map(|&i| records[i].key.clone()).collect();
            debug!(group = %id, members = paths.len(), original = %paths[0], "Duplicate group");

            groups.push(DuplicateGroup {
                id,
                name: key.name,
                size_mb: records[members[0]].size_mb(),
                hash: key.hash,
                paths,
                wasted_mb: round2(wasted_mb),
            });
        }

        let group_count = groups.len();

        DuplicateReport {
            groups,
            duplicate_size_gb: round2(duplicate_size_gb),
            objects_analyzed: records.len() as u64,
            copy_count,
            group_count,
        }
    }

    fn key_for(&self, record: &ObjectRecord) -> DuplicateKey {
        let name = if self.config.ignore_case {
            record.name.to_lowercase().into()
        } else {
            record.name.clone()
        };
        DuplicateKey {
            name,
            size_mb_hundredths: mb_hundredths(record.size),
            hash: record.content_hash.clone(),
        }
    }
}

impl Default for DuplicateFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest key first, then oldest.
fn original_order(a: &ObjectRecord, b: &ObjectRecord) -> Ordering {
    a.key
        .chars()
        .count()
        .cmp(&b.key.chars().count())
        .then(a.last_modified.cmp(&b.last_modified))
}
