//! S3-backed [`BucketStorage`].

use async_trait::async_trait;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use tracing::debug;

use bucket_cloner_core::{BucketStorage, ClientError, CopySource, ObjectListing};

use crate::client_error;

/// [`BucketStorage`] on top of an [`aws_sdk_s3::Client`].
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: aws_sdk_s3::Client,
}

impl S3Storage {
    /// Wrap an S3 client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// The wrapped S3 client.
    #[must_use]
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

#[async_trait]
impl BucketStorage for S3Storage {
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), ClientError> {
        self.client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(client_error)?;
        debug!(bucket, "put_bucket_policy completed");
        Ok(())
    }

    async fn delete_bucket_policy(&self, bucket: &str) -> Result<(), ClientError> {
        self.client
            .delete_bucket_policy()
            .bucket(bucket)
            .send()
            .await
            .map_err(client_error)?;
        debug!(bucket, "delete_bucket_policy completed");
        Ok(())
    }

    async fn list_objects(&self, bucket: &str) -> Result<ObjectListing, ClientError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(client_error)?;
        let listing = listing_from_output(&output);
        debug!(
            bucket,
            keys = listing.keys.len(),
            truncated = listing.truncated,
            "list_objects_v2 completed"
        );
        Ok(listing)
    }

    async fn copy_object(
        &self,
        source: &CopySource,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), ClientError> {
        self.client
            .copy_object()
            .copy_source(source.to_string())
            .bucket(dest_bucket)
            .key(dest_key)
            .send()
            .await
            .map_err(client_error)?;
        debug!(%source, dest_bucket, dest_key, "copy_object completed");
        Ok(())
    }
}

/// Convert one `ListObjectsV2` page into an [`ObjectListing`].
///
/// Entries without a key are dropped.
#[must_use]
pub fn listing_from_output(output: &ListObjectsV2Output) -> ObjectListing {
    ObjectListing {
        keys: output
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(ToOwned::to_owned))
            .collect(),
        truncated: output.is_truncated() == Some(true),
    }
}
