//! The paginated listing capability consumed by the scanner.

use std::future::Future;

use chrono::{DateTime, Utc};

use bucketsweep_core::ScanError;

/// Parameters for fetching one page of a listing.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub bucket: &'a str,
    pub prefix: &'a str,
    /// Token returned by the previous page, `None` for the first page.
    pub continuation_token: Option<&'a str>,
}

/// One object entry as returned by the provider.
///
/// Providers are allowed to omit any field; the scanner decides which
/// omissions are fatal.
#[derive(Debug, Clone, Default)]
pub struct RawObject {
    pub key: Option<String>,
    pub size: Option<i64>,
    pub last_modified: Option<DateTime<Utc>>,
    pub e_tag: Option<String>,
}

impl RawObject {
    /// Create a fully populated entry.
    pub fn new(
        key: impl Into<String>,
        size: i64,
        last_modified: DateTime<Utc>,
        e_tag: impl Into<String>,
    ) -> Self {
        Self {
            key: Some(key.into()),
            size: Some(size),
            last_modified: Some(last_modified),
            e_tag: Some(e_tag.into()),
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub objects: Vec<RawObject>,
    /// Token for the next page; `None` once the listing is exhausted.
    pub next_token: Option<String>,
}

/// A provider that can list objects under a prefix, one page at a time.
pub trait ObjectSource {
    /// Fetch a single page of results.
    fn list_page(
        &self,
        request: PageRequest<'_>,
    ) -> impl Future<Output = Result<ObjectPage, ScanError>> + Send;
}
