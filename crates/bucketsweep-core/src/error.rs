//! Error types for listing operations.

use thiserror::Error;

/// Boxed error from the storage provider's client.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while listing a bucket.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The listing request failed (transport, auth, missing bucket, ...).
    #[error("Failed to list s3://{bucket}/{prefix}: {source}")]
    Listing {
        bucket: String,
        prefix: String,
        #[source]
        source: ProviderError,
    },

    /// The provider returned an object entry without a required field.
    #[error("Malformed object entry{}: {message}", describe_key(.key))]
    MalformedObject {
        key: Option<String>,
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

fn describe_key(key: &Option<String>) -> String {
    key.as_deref().map(|k| format!(" '{k}'")).unwrap_or_default()
}

impl ScanError {
    /// Wrap a provider error with the bucket and prefix being listed.
    pub fn listing(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        source: impl Into<ProviderError>,
    ) -> Self {
        Self::Listing {
            bucket: bucket.into(),
            prefix: prefix.into(),
            source: source.into(),
        }
    }

    /// Create a malformed-object error.
    pub fn malformed(key: Option<&str>, message: impl Into<String>) -> Self {
        Self::MalformedObject {
            key: key.map(str::to_string),
            message: message.into(),
        }
    }
}
