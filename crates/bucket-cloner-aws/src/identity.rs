//! [`IdentityLookup`] implementations backed by IAM and STS.

use async_trait::async_trait;
use tracing::debug;

use bucket_cloner_core::{ClientError, IdentityLookup};

use crate::client_error;

/// Resolves the caller through IAM `GetUser`.
///
/// Works for IAM users only; an assumed role has no IAM user to return.
#[derive(Debug, Clone)]
pub struct IamUserIdentity {
    client: aws_sdk_iam::Client,
}

impl IamUserIdentity {
    /// Wrap an IAM client.
    #[must_use]
    pub fn new(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityLookup for IamUserIdentity {
    async fn resolve_caller_identity(&self) -> Result<Option<String>, ClientError> {
        let output = self
            .client
            .get_user()
            .send()
            .await
            .map_err(client_error)?;
        let arn = output.user().map(|user| user.arn().to_owned());
        debug!(arn = ?arn, "get_user completed");
        Ok(arn)
    }
}

/// Resolves the caller through STS `GetCallerIdentity`.
#[derive(Debug, Clone)]
pub struct StsCallerIdentity {
    client: aws_sdk_sts::Client,
}

impl StsCallerIdentity {
    /// Wrap an STS client.
    #[must_use]
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityLookup for StsCallerIdentity {
    async fn resolve_caller_identity(&self) -> Result<Option<String>, ClientError> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(client_error)?;
        let arn = output.arn().map(ToOwned::to_owned);
        debug!(arn = ?arn, "get_caller_identity completed");
        Ok(arn)
    }
}
