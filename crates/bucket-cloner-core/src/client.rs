//! Client capabilities consumed by the [`Cloner`](crate::Cloner).
//!
//! The cloner never talks to a cloud provider directly. It goes through two
//! narrow traits:
//!
//! - [`IdentityLookup`] resolves the destination caller to an ARN.
//! - [`BucketStorage`] grants/revokes a bucket policy, lists a bucket and
//!   copies objects server-side.
//!
//! Both traits are object-safe (`#[async_trait]`) so the cloner can hold them
//! as `Arc<dyn ...>` and tests can substitute in-memory doubles.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::ClientError;

/// Characters left unencoded in a copy source key.
///
/// Unreserved characters plus `/`, so that key "directories" survive intact.
const COPY_SOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Resolves the calling identity to a stable identifier.
#[async_trait::async_trait]
pub trait IdentityLookup: fmt::Debug + Send + Sync {
    /// Resolve the caller identity.
    ///
    /// Returns `Ok(None)` when the call succeeded but the response carried no
    /// identifier.
    async fn resolve_caller_identity(&self) -> Result<Option<String>, ClientError>;
}

/// Bucket-level operations needed to clone a bucket.
///
/// The same trait serves both sides: the source client only sees the policy
/// and listing calls, the destination client only sees copies.
#[async_trait::async_trait]
pub trait BucketStorage: fmt::Debug + Send + Sync {
    /// Replace the bucket policy of `bucket` with `policy` (a JSON document).
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), ClientError>;

    /// Delete the bucket policy of `bucket`.
    async fn delete_bucket_policy(&self, bucket: &str) -> Result<(), ClientError>;

    /// List the objects of `bucket`.
    ///
    /// Only the first page of results is returned; see
    /// [`ObjectListing::truncated`].
    async fn list_objects(&self, bucket: &str) -> Result<ObjectListing, ClientError>;

    /// Copy `source` into `dest_bucket` under `dest_key` without downloading it.
    async fn copy_object(
        &self,
        source: &CopySource,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), ClientError>;
}

/// A single page of object keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListing {
    /// Object keys in listing order.
    pub keys: Vec<String>,
    /// Whether the service reported more results beyond this page.
    pub truncated: bool,
}

impl ObjectListing {
    /// Create a complete (non-truncated) listing.
    #[must_use]
    pub fn new(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            truncated: false,
        }
    }
}

/// Reference to an object that a copy request reads from.
///
/// # Examples
///
/// ```
/// use bucket_cloner_core::CopySource;
///
/// let source = CopySource::new("src-bucket", "photos/summer 2020.jpg");
/// assert_eq!(source.to_string(), "src-bucket/photos/summer%202020.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySource {
    bucket: String,
    key: String,
}

impl CopySource {
    /// Create a copy source for `key` in `bucket`.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The source bucket.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The unencoded source key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Renders the `x-amz-copy-source` form: `bucket/percent-encoded-key`.
impl fmt::Display for CopySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.bucket,
            utf8_percent_encode(&self.key, COPY_SOURCE_ENCODE_SET)
        )
    }
}
