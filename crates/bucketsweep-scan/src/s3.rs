//! Amazon S3 (and S3-compatible) listing source.

use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::DateTime as AwsDateTime;
use aws_sdk_s3::types::Object;
use chrono::{DateTime, Utc};
use tracing::debug;

use bucketsweep_core::ScanError;

use crate::source::{ObjectPage, ObjectSource, PageRequest, RawObject};

/// Largest page `ListObjectsV2` will return.
pub const MAX_PAGE_SIZE: i32 = 1000;

/// Connection options for [`S3Source`].
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    /// Region override (otherwise taken from the environment/profile).
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores.
    pub endpoint_url: Option<String>,
    /// Use path-style addressing (`endpoint/bucket/key`).
    pub force_path_style: bool,
    /// Maximum keys per page, `1..=MAX_PAGE_SIZE` (provider default when `None`).
    pub page_size: Option<i32>,
}

/// Lists objects through the AWS SDK `ListObjectsV2` call.
#[derive(Debug, Clone)]
pub struct S3Source {
    client: Client,
    page_size: Option<i32>,
}

impl S3Source {
    /// Build a client from the default credential chain and the given options.
    pub async fn connect(options: &S3Options) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(options.force_path_style)
            .build();

        debug!(
            region = ?shared.region(),
            endpoint = ?options.endpoint_url,
            path_style = options.force_path_style,
            "S3 client configured"
        );

        Self {
            client: Client::from_conf(config),
            page_size: options.page_size,
        }
    }

}

impl ObjectSource for S3Source {
    async fn list_page(&self, request: PageRequest<'_>) -> Result<ObjectPage, ScanError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(request.bucket)
            .prefix(request.prefix)
            .set_continuation_token(request.continuation_token.map(str::to_string))
            .set_max_keys(self.page_size)
            .send()
            .await
            .map_err(|e| ScanError::listing(request.bucket, request.prefix, e))?;

        let objects = response.contents().iter().map(raw_object).collect();

        // A truncated page without a token cannot be continued
        let next_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }
}

fn raw_object(object: &Object) -> RawObject {
    RawObject {
        key: object.key().map(str::to_string),
        size: object.size(),
        last_modified: object.last_modified().and_then(to_utc),
        e_tag: object.e_tag().map(str::to_string),
    }
}

fn to_utc(timestamp: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}
