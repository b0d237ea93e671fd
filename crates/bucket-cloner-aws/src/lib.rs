//! AWS SDK clients for the bucket cloner.
//!
//! Implements the [`bucket_cloner_core`] client traits on top of the AWS SDK
//! for Rust:
//!
//! - [`S3Storage`] for [`BucketStorage`](bucket_cloner_core::BucketStorage)
//!   (`PutBucketPolicy`, `DeleteBucketPolicy`, `ListObjectsV2`, `CopyObject`)
//! - [`IamUserIdentity`] and [`StsCallerIdentity`] for
//!   [`IdentityLookup`](bucket_cloner_core::IdentityLookup)
//!
//! [`cloner_from_settings`] wires them together from a [`Settings`] file:
//! the source profile drives the policy and listing calls, the destination
//! profile drives the copies and the identity lookup.

pub mod identity;
pub mod sdk;
pub mod storage;

use std::sync::Arc;

use aws_sdk_s3::error::DisplayErrorContext;

use bucket_cloner_core::{ClientError, Cloner, Settings, SettingsError};

pub use identity::{IamUserIdentity, StsCallerIdentity};
pub use storage::S3Storage;

/// Build a [`Cloner`] for the buckets and profiles in `settings`.
///
/// Fails if either bucket name is missing. The propagation delay keeps its
/// default; override it with [`Cloner::with_propagation_delay`].
pub async fn cloner_from_settings(settings: &Settings) -> Result<Cloner, SettingsError> {
    let (source_bucket, destination_bucket) = settings.bucket_names()?;

    let source = sdk::s3_storage(&settings.source).await;
    let destination = sdk::s3_storage(&settings.destination).await;
    let identity = sdk::identity_lookup(&settings.destination, settings.identity).await;

    Ok(Cloner::new(
        Arc::new(source),
        Arc::new(destination),
        identity,
        source_bucket,
        destination_bucket,
    ))
}

/// Flatten an SDK error, including its source chain, into a [`ClientError`].
pub(crate) fn client_error<E>(err: E) -> ClientError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ClientError::from(DisplayErrorContext(err).to_string())
}
