//! SDK configuration and client construction from [`BucketInfo`].
//!
//! Each side of a clone gets its own shared config: the named credentials
//! profile, plus the optional region and endpoint overrides from the settings
//! file. When an endpoint is set the S3 client switches to path-style
//! addressing, which S3-compatible services generally expect.

use std::sync::Arc;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;
use tracing::debug;

use bucket_cloner_core::{BucketInfo, IdentityLookup, IdentitySource};

use crate::identity::{IamUserIdentity, StsCallerIdentity};
use crate::storage::S3Storage;

/// Load the shared SDK configuration for one side of the clone.
pub async fn load_sdk_config(info: &BucketInfo) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).profile_name(&info.profile);

    if let Some(region) = &info.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &info.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;
    debug!(
        profile = %info.profile,
        region = ?config.region(),
        endpoint = ?config.endpoint_url(),
        "loaded sdk config",
    );
    config
}

/// Build an S3 client from a loaded config.
#[must_use]
pub fn s3_client(config: &SdkConfig, force_path_style: bool) -> aws_sdk_s3::Client {
    let s3_config = aws_sdk_s3::config::Builder::from(config)
        .force_path_style(force_path_style)
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

/// Build the [`S3Storage`] for one side of the clone.
pub async fn s3_storage(info: &BucketInfo) -> S3Storage {
    let config = load_sdk_config(info).await;
    S3Storage::new(s3_client(&config, info.endpoint.is_some()))
}

/// Build the identity lookup for `info`, using the requested strategy.
pub async fn identity_lookup(
    info: &BucketInfo,
    source: IdentitySource,
) -> Arc<dyn IdentityLookup> {
    let config = load_sdk_config(info).await;
    match source {
        IdentitySource::IamUser => Arc::new(IamUserIdentity::new(aws_sdk_iam::Client::new(&config))),
        IdentitySource::Sts => Arc::new(StsCallerIdentity::new(aws_sdk_sts::Client::new(&config))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_apply_region_and_endpoint_overrides() {
        let info = BucketInfo::new("bucket-cloner-test-profile")
            .with_region("eu-west-1")
            .with_endpoint("http://localhost:4566");

        let config = load_sdk_config(&info).await;

        assert_eq!(config.region().map(Region::as_ref), Some("eu-west-1"));
        assert_eq!(config.endpoint_url(), Some("http://localhost:4566"));
    }

    #[tokio::test]
    async fn test_should_leave_endpoint_unset_by_default() {
        let info = BucketInfo::new("bucket-cloner-test-profile").with_region("us-east-1");

        let config = load_sdk_config(&info).await;

        assert_eq!(config.endpoint_url(), None);
    }
}
