//! Cross-account bucket cloning.
//!
//! This crate holds the provider-independent part of the bucket cloner: the
//! [`Cloner`] orchestration, the temporary [`PolicyDocument`], the
//! [`Settings`] file model and the runtime [`ClonerConfig`]. Talking to an
//! actual cloud provider is left to implementations of [`IdentityLookup`]
//! and [`BucketStorage`].
//!
//! # Architecture
//!
//! ```text
//!   Settings / ClonerConfig
//!          |
//!          v
//!       Cloner  ----> IdentityLookup (destination account)
//!          |
//!          +--------> BucketStorage (source: grant, list, revoke)
//!          |
//!          +--------> BucketStorage (destination: copy)
//! ```

pub mod client;
pub mod cloner;
pub mod config;
pub mod error;
pub mod policy;
pub mod settings;

pub use client::{BucketStorage, CopySource, IdentityLookup, ObjectListing};
pub use cloner::{CloneReport, Cloner};
pub use config::ClonerConfig;
pub use error::{
    ClientError, CloneError, CloneResult, ObjectCopyError, PolicyRevokeError, SettingsError,
};
pub use policy::PolicyDocument;
pub use settings::{BucketInfo, IdentitySource, Settings};
