//! Error types for bucket cloning.
//!
//! [`CloneError`] covers the failures that abort a clone and are returned to
//! the caller. [`ObjectCopyError`] and [`PolicyRevokeError`] are the
//! non-fatal failures: they are logged (and recorded in the
//! [`CloneReport`](crate::cloner::CloneReport)) but never returned.
//!
//! Every variant keeps the underlying [`ClientError`] as its
//! [`source`](std::error::Error::source), so callers can still inspect the
//! exact error produced by the remote service.

use std::path::PathBuf;

/// Error produced by an identity or storage client.
///
/// Adapters box whatever their SDK returns; test doubles can build one from a
/// plain string with `ClientError::from("message")`.
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal errors returned by [`Cloner::clone_bucket`](crate::Cloner::clone_bucket).
#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    /// The identity lookup call itself failed. Nothing was granted.
    #[error("failed to resolve caller identity: {source}")]
    IdentityLookup {
        /// The identity client error.
        #[source]
        source: ClientError,
    },

    /// The identity lookup succeeded but returned no usable identifier.
    #[error("caller identity did not resolve to a usable ARN")]
    InvalidIdentity,

    /// The access policy document could not be serialized.
    #[error("failed to encode access policy: {0}")]
    PolicyEncoding(#[from] serde_json::Error),

    /// Applying the access policy to the source bucket failed.
    ///
    /// No revoke is attempted after this error.
    #[error("failed to grant read access on bucket {bucket}: {source}")]
    PolicyGrant {
        /// The source bucket.
        bucket: String,
        /// The storage client error.
        #[source]
        source: ClientError,
    },

    /// Listing the source bucket failed after a successful grant.
    ///
    /// The access policy has already been revoked when this is returned.
    #[error("failed to list objects in bucket {bucket}: {source}")]
    Listing {
        /// The source bucket.
        bucket: String,
        /// The storage client error.
        #[source]
        source: ClientError,
    },
}

/// A single object that could not be copied.
#[derive(Debug, thiserror::Error)]
#[error("failed to copy object {key}: {source}")]
pub struct ObjectCopyError {
    /// Key of the object in the source bucket.
    pub key: String,
    /// The storage client error.
    #[source]
    pub source: ClientError,
}

/// The temporary access policy could not be deleted.
#[derive(Debug, thiserror::Error)]
#[error("failed to revoke access policy on bucket {bucket}: {source}")]
pub struct PolicyRevokeError {
    /// The source bucket.
    pub bucket: String,
    /// The storage client error.
    #[source]
    pub source: ClientError,
}

/// Errors raised while loading or validating [`Settings`](crate::Settings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", path.display())]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// The I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not a valid settings document.
    #[error("failed to parse settings file {}: {source}", path.display())]
    Parse {
        /// Path of the settings file.
        path: PathBuf,
        /// The YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A bucket name required for cloning is not configured.
    #[error("no bucket configured for {side}")]
    MissingBucket {
        /// Which side is missing (`"source"` or `"destination"`).
        side: &'static str,
    },
}

/// Convenience result type for clone operations.
pub type CloneResult<T> = Result<T, CloneError>;
