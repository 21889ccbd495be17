//! Paginated bucket scanner.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use bucketsweep_core::units::bytes_to_gb;
use bucketsweep_core::{ContentHash, ObjectRecord, ScanError, SweepConfig};

use crate::progress::{ProgressTracker, ScanProgress};
use crate::source::{ObjectSource, PageRequest, RawObject};

/// Result of draining a listing.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Every object yielded, in listing order.
    pub records: Vec<ObjectRecord>,
    /// Sum of the sizes of all yielded objects.
    pub total_bytes: u64,
    /// Final progress snapshot.
    pub progress: ScanProgress,
}

impl Listing {
    /// Total size in gigabytes, rounded to two decimals.
    pub fn total_gb(&self) -> f64 {
        bytes_to_gb(self.total_bytes)
    }

    /// Number of objects listed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the listing yielded no objects.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One-pass cursor over the pages of a listing.
///
/// Each call to [`next_batch`](Self::next_batch) fetches one page. Once the
/// provider stops returning a continuation token the cursor is exhausted and
/// keeps returning `None`; it cannot be rewound.
pub struct ListingCursor<'a, S> {
    source: &'a S,
    config: &'a SweepConfig,
    now: DateTime<Utc>,
    next_token: Option<String>,
    exhausted: bool,
    tracker: ProgressTracker,
}

impl<'a, S: ObjectSource> ListingCursor<'a, S> {
    fn new(source: &'a S, config: &'a SweepConfig, now: DateTime<Utc>) -> Self {
        Self {
            source,
            config,
            now,
            next_token: None,
            exhausted: false,
            tracker: ProgressTracker::new(),
        }
    }

    /// Fetch the next page, returning `None` once the listing is exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<ObjectRecord>>, ScanError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .source
            .list_page(PageRequest {
                bucket: &self.config.bucket,
                prefix: &self.config.prefix,
                continuation_token: self.next_token.as_deref(),
            })
            .await?;

        self.next_token = page.next_token;
        self.exhausted = self.next_token.is_none();

        let mut records = Vec::with_capacity(page.objects.len());
        for raw in page.objects {
            match self.convert(raw)? {
                Some(record) => {
                    self.tracker.record_object(record.size);
                    records.push(record);
                }
                None => self.tracker.record_marker(),
            }
        }
        self.tracker.record_page();

        let progress = self.tracker.snapshot();
        debug!(
            page = progress.pages_fetched,
            objects = records.len(),
            total_objects = progress.objects_listed,
            bytes = progress.bytes_listed,
            markers = progress.markers_skipped,
            elapsed_ms = progress.elapsed.as_millis() as u64,
            more = !self.exhausted,
            "Fetched listing page"
        );

        Ok(Some(records))
    }

    /// Check if the provider has signalled the end of the listing.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Bytes yielded so far.
    pub fn total_bytes(&self) -> u64 {
        self.tracker.bytes_listed()
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> ScanProgress {
        self.tracker.snapshot()
    }

    /// Turn a provider entry into a record. Directory markers yield `None`.
    fn convert(&self, raw: RawObject) -> Result<Option<ObjectRecord>, ScanError> {
        let key = raw
            .key
            .ok_or_else(|| ScanError::malformed(None, "missing key"))?;

        if key.ends_with('/') {
            return Ok(None);
        }

        let size = match raw.size {
            Some(size) => u64::try_from(size)
                .map_err(|_| ScanError::malformed(Some(&key), format!("negative size {size}")))?,
            None => return Err(ScanError::malformed(Some(&key), "missing size")),
        };

        let last_modified = raw
            .last_modified
            .ok_or_else(|| ScanError::malformed(Some(&key), "missing last-modified time"))?;

        let content_hash = raw
            .e_tag
            .as_deref()
            .map(ContentHash::from_etag)
            .unwrap_or_default();

        let is_stale = self.config.is_stale(last_modified, self.now);

        Ok(Some(
            ObjectRecord::new(key, size, last_modified, content_hash).with_stale(is_stale),
        ))
    }
}

/// Lists every object under the configured prefix.
pub struct BucketScanner<S> {
    source: S,
}

impl<S: ObjectSource> BucketScanner<S> {
    /// Create a scanner over the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Open a page cursor. `now` is the reference instant for staleness.
    pub fn cursor<'a>(&'a self, config: &'a SweepConfig, now: DateTime<Utc>) -> ListingCursor<'a, S> {
        ListingCursor::new(&self.source, config, now)
    }

    /// Drain the whole listing into memory.
    pub async fn scan(&self, config: &SweepConfig, now: DateTime<Utc>) -> Result<Listing, ScanError> {
        let mut cursor = self.cursor(config, now);
        let mut records = Vec::new();

        while let Some(batch) = cursor.next_batch().await? {
            records.extend(batch);
        }

        let progress = cursor.progress();
        let listing = Listing {
            records,
            total_bytes: cursor.total_bytes(),
            progress,
        };

        info!(
            bucket = %config.bucket,
            prefix = %config.prefix,
            objects = listing.len(),
            total_gb = listing.total_gb(),
            pages = listing.progress.pages_fetched,
            objects_per_sec = listing.progress.objects_per_second(),
            "Listing complete"
        );

        Ok(listing)
    }

    /// Get the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}
