//! Grant, copy and revoke orchestration.
//!
//! [`Cloner::clone_bucket`] runs four strictly ordered steps:
//!
//! ```text
//! resolve identity -> grant policy -> list + copy -> revoke policy
//! ```
//!
//! Once the grant has succeeded the revoke always runs, whatever happens
//! during the copy step. A failed identity lookup or grant returns
//! immediately without touching anything else.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::client::{BucketStorage, CopySource, IdentityLookup};
use crate::config::DEFAULT_PROPAGATION_DELAY;
use crate::error::{CloneError, CloneResult, ObjectCopyError, PolicyRevokeError};
use crate::policy::PolicyDocument;

/// Outcome of a clone that got past the listing step.
#[derive(Debug, Default)]
pub struct CloneReport {
    /// Number of objects returned by the listing.
    pub listed: usize,
    /// Keys that were copied, in copy order.
    pub copied: Vec<String>,
    /// Objects whose copy failed.
    pub failed: Vec<ObjectCopyError>,
    /// Whether the listing reported more objects than it returned.
    pub truncated: bool,
    /// Whether the temporary access policy was deleted.
    pub policy_revoked: bool,
}

impl CloneReport {
    /// `true` if every listed object was copied, the listing was complete,
    /// and the access policy was revoked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && !self.truncated && self.policy_revoked
    }
}

/// Copies every object of a source bucket into a destination bucket.
///
/// The destination identity is granted temporary read access to the source
/// bucket for the duration of one [`clone_bucket`](Self::clone_bucket) call.
/// A `Cloner` is not meant to run concurrent clones.
#[derive(Debug)]
pub struct Cloner {
    identity: Arc<dyn IdentityLookup>,
    source: Arc<dyn BucketStorage>,
    destination: Arc<dyn BucketStorage>,
    source_bucket: String,
    destination_bucket: String,
    propagation_delay: Duration,
}

impl Cloner {
    /// Create a cloner with the default propagation delay.
    ///
    /// `identity` must resolve the identity that `destination` acts as.
    pub fn new(
        source: Arc<dyn BucketStorage>,
        destination: Arc<dyn BucketStorage>,
        identity: Arc<dyn IdentityLookup>,
        source_bucket: impl Into<String>,
        destination_bucket: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            source,
            destination,
            source_bucket: source_bucket.into(),
            destination_bucket: destination_bucket.into(),
            propagation_delay: DEFAULT_PROPAGATION_DELAY,
        }
    }

    /// Override the pause between the grant and the listing.
    ///
    /// A zero duration skips the pause entirely.
    #[must_use]
    pub fn with_propagation_delay(mut self, delay: Duration) -> Self {
        self.propagation_delay = delay;
        self
    }

    /// The source bucket name.
    #[must_use]
    pub fn source_bucket(&self) -> &str {
        &self.source_bucket
    }

    /// The destination bucket name.
    #[must_use]
    pub fn destination_bucket(&self) -> &str {
        &self.destination_bucket
    }

    /// Clone the source bucket into the destination bucket.
    ///
    /// Returns the identity, grant or listing error if one of those steps
    /// fails. Individual copy failures and a failed revoke are logged and
    /// reported in the returned [`CloneReport`] instead.
    pub async fn clone_bucket(&self) -> CloneResult<CloneReport> {
        info!(
            source = %self.source_bucket,
            destination = %self.destination_bucket,
            "starting bucket clone",
        );

        self.grant_source_access().await?;

        if !self.propagation_delay.is_zero() {
            tokio::time::sleep(self.propagation_delay).await;
        }

        let outcome = self.copy_objects().await;
        let policy_revoked = self.revoke_source_access().await;

        let mut report = outcome?;
        report.policy_revoked = policy_revoked;

        info!(
            source = %self.source_bucket,
            destination = %self.destination_bucket,
            listed = report.listed,
            copied = report.copied.len(),
            failed = report.failed.len(),
            "bucket clone finished",
        );

        Ok(report)
    }

    async fn grant_source_access(&self) -> CloneResult<()> {
        let arn = self
            .identity
            .resolve_caller_identity()
            .await
            .map_err(|source| CloneError::IdentityLookup { source })?
            .filter(|arn| !arn.is_empty())
            .ok_or(CloneError::InvalidIdentity)?;

        let policy = PolicyDocument::cross_account_read(&self.source_bucket, &arn).to_json()?;
        debug!(bucket = %self.source_bucket, %policy, "applying access policy");

        self.source
            .put_bucket_policy(&self.source_bucket, &policy)
            .await
            .map_err(|source| CloneError::PolicyGrant {
                bucket: self.source_bucket.clone(),
                source,
            })?;

        info!(bucket = %self.source_bucket, principal = %arn, "granted temporary read access");
        Ok(())
    }

    async fn copy_objects(&self) -> CloneResult<CloneReport> {
        let listing = self
            .source
            .list_objects(&self.source_bucket)
            .await
            .map_err(|source| CloneError::Listing {
                bucket: self.source_bucket.clone(),
                source,
            })?;

        // Only the first page is processed.
        if listing.truncated {
            warn!(
                bucket = %self.source_bucket,
                listed = listing.keys.len(),
                "object listing is truncated, objects beyond the first page will not be copied",
            );
        }

        let mut report = CloneReport {
            listed: listing.keys.len(),
            truncated: listing.truncated,
            ..CloneReport::default()
        };

        for key in listing.keys {
            let source = CopySource::new(self.source_bucket.as_str(), key.as_str());
            let copied = self
                .destination
                .copy_object(&source, &self.destination_bucket, &key)
                .await;
            match copied {
                Ok(()) => {
                    debug!(%key, "copied object");
                    report.copied.push(key);
                }
                Err(error) => {
                    let err = ObjectCopyError { key, source: error };
                    warn!(error = %err, "skipping object");
                    report.failed.push(err);
                }
            }
        }

        Ok(report)
    }

    async fn revoke_source_access(&self) -> bool {
        match self.source.delete_bucket_policy(&self.source_bucket).await {
            Ok(()) => {
                info!(bucket = %self.source_bucket, "revoked temporary read access");
                true
            }
            Err(source) => {
                let err = PolicyRevokeError {
                    bucket: self.source_bucket.clone(),
                    source,
                };
                error!(error = %err, "temporary access policy may still be attached");
                false
            }
        }
    }
}
