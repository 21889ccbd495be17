//! Listing progress reporting.

use std::time::{Duration, Instant};

/// Progress information during a listing.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of pages fetched so far.
    pub pages_fetched: u64,
    /// Number of objects yielded so far.
    pub objects_listed: u64,
    /// Total bytes of the yielded objects.
    pub bytes_listed: u64,
    /// Directory marker entries skipped.
    pub markers_skipped: u64,
    /// Time elapsed since the listing started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            objects_listed: 0,
            bytes_listed: 0,
            markers_skipped: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate listing rate in objects per second.
    pub fn objects_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.objects_listed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    pages_fetched: u64,
    objects_listed: u64,
    bytes_listed: u64,
    markers_skipped: u64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            pages_fetched: 0,
            objects_listed: 0,
            bytes_listed: 0,
            markers_skipped: 0,
        }
    }

    pub fn record_object(&mut self, size: u64) {
        self.objects_listed += 1;
        self.bytes_listed += size;
    }

    pub fn record_marker(&mut self) {
        self.markers_skipped += 1;
    }

    pub fn record_page(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn bytes_listed(&self) -> u64 {
        self.bytes_listed
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            pages_fetched: self.pages_fetched,
            objects_listed: self.objects_listed,
            bytes_listed: self.bytes_listed,
            markers_skipped: self.markers_skipped,
            elapsed: self.start_time.elapsed(),
        }
    }
}
