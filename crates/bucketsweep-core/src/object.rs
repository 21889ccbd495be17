//! Object record types.

use std::fmt;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::units;

/// Provider-supplied content hash (an S3 ETag with its quotes stripped).
///
/// The value is opaque: multipart uploads produce ETags that are not a digest
/// of the content, so two hashes are only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentHash(pub CompactString);

impl ContentHash {
    /// Create a hash from a raw ETag, stripping surrounding double quotes.
    pub fn from_etag(etag: &str) -> Self {
        Self(etag.trim_matches('"').into())
    }

    /// Get the hash as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the provider supplied no hash.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a duplicate group, rendered as `DUP-001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Create a new group id from its sequence number.
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DUP-{:03}", self.0)
    }
}

/// Role of an object inside its duplicate group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicateRole {
    /// The copy that is kept.
    Original,
    /// A redundant copy that can be deleted.
    Copy,
}

/// Duplicate group membership assigned during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMembership {
    pub group: GroupId,
    pub role: DuplicateRole,
}

/// Snapshot of a single stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Full object key, unique within a scan.
    pub key: String,

    /// Last `/`-separated segment of the key.
    pub name: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub last_modified: DateTime<Utc>,

    /// Content hash reported by the provider.
    pub content_hash: ContentHash,

    /// Whether the object is older than the configured age threshold.
    pub is_stale: bool,

    /// Duplicate group membership (set by the duplicate finder).
    pub duplicate: Option<DuplicateMembership>,
}

impl ObjectRecord {
    /// Create a new record. The name is derived from the key.
    pub fn new(
        key: impl Into<String>,
        size: u64,
        last_modified: DateTime<Utc>,
        content_hash: ContentHash,
    ) -> Self {
        let key = key.into();
        let name = file_name(&key).into();
        Self {
            key,
            name,
            size,
            last_modified,
            content_hash,
            is_stale: false,
            duplicate: None,
        }
    }

    /// Set the staleness flag.
    pub fn with_stale(mut self, is_stale: bool) -> Self {
        self.is_stale = is_stale;
        self
    }

    /// Size in megabytes, rounded to two decimals.
    pub fn size_mb(&self) -> f64 {
        units::bytes_to_mb(self.size)
    }

    /// Whole days elapsed between the last modification and `now`.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_modified).num_days()
    }

    /// Check if this object belongs to any duplicate group.
    pub fn is_duplicate_member(&self) -> bool {
        self.duplicate.is_some()
    }

    /// Check if this object is a redundant copy.
    pub fn is_duplicate_copy(&self) -> bool {
        matches!(
            self.duplicate,
            Some(DuplicateMembership {
                role: DuplicateRole::Copy,
                ..
            })
        )
    }

    /// Group id, if this object is part of a duplicate group.
    pub fn group_id(&self) -> Option<GroupId> {
        self.duplicate.map(|m| m.group)
    }
}

/// Last segment of an object key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
