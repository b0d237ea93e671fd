//! Source and destination bucket settings.
//!
//! Settings are read from a YAML document:
//!
//! ```yaml
//! source:
//!   bucket: src-bucket
//!   region: us-east-1
//!   profile: src-profile
//! destination:
//!   bucket: dst-bucket
//!   profile: dst-profile
//! ```
//!
//! `bucket`, `region` and `endpoint` are optional on both sides; `profile` is
//! required. A missing bucket name only becomes an error when a clone is
//! about to start (see [`Settings::bucket_names`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Connection details for one side of the clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name, if configured.
    pub bucket: Option<String>,
    /// Region override. Falls back to the profile's region when absent.
    pub region: Option<String>,
    /// Name of the shared credentials profile.
    pub profile: String,
    /// Endpoint URL override for S3-compatible services.
    pub endpoint: Option<String>,
}

impl BucketInfo {
    /// Create settings for `profile` with nothing else configured.
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            bucket: None,
            region: None,
            profile: profile.into(),
            endpoint: None,
        }
    }

    /// Set the bucket name.
    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    fn require_bucket(&self, side: &'static str) -> Result<&str, SettingsError> {
        self.bucket
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or(SettingsError::MissingBucket { side })
    }
}

/// How the destination identity is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// IAM `GetUser` for the destination profile's user.
    #[default]
    IamUser,
    /// STS `GetCallerIdentity`, which also works for assumed roles.
    Sts,
}

/// The full settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Bucket to copy from.
    pub source: BucketInfo,
    /// Bucket to copy into. Its profile is also the identity that is granted access.
    pub destination: BucketInfo,
    /// Identity resolution strategy for the destination.
    #[serde(default)]
    pub identity: IdentitySource,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Source and destination bucket names.
    ///
    /// Fails if either side has no bucket configured.
    pub fn bucket_names(&self) -> Result<(&str, &str), SettingsError> {
        Ok((
            self.source.require_bucket("source")?,
            self.destination.require_bucket("destination")?,
        ))
    }
}
