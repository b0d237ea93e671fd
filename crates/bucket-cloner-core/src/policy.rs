//! Temporary cross-account access policy.
//!
//! The policy applied to the source bucket grants the destination identity
//! `s3:Get*` and `s3:List*` on the bucket itself and on every object in it,
//! and nothing else:
//!
//! ```json
//! {
//!   "Version": "2012-10-17",
//!   "Statement": [{
//!     "Effect": "Allow",
//!     "Principal": { "AWS": "<destination ARN>" },
//!     "Action": ["s3:Get*", "s3:List*"],
//!     "Resource": ["arn:aws:s3:::<bucket>", "arn:aws:s3:::<bucket>/*"]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Actions granted to the destination identity.
pub const READ_ACTIONS: [&str; 2] = ["s3:Get*", "s3:List*"];

/// A bucket policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Policy language version.
    pub version: String,
    /// Policy statements.
    pub statement: Vec<PolicyStatement>,
}

/// A single policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// `Allow` or `Deny`.
    pub effect: String,
    /// Who the statement applies to.
    pub principal: Principal,
    /// Granted actions.
    pub action: Vec<String>,
    /// Resource ARNs the actions apply to.
    pub resource: Vec<String>,
}

/// Statement principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// ARN of the AWS identity.
    #[serde(rename = "AWS")]
    pub aws: String,
}

impl PolicyDocument {
    /// Build the read-only grant of `bucket` to `principal_arn`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucket_cloner_core::PolicyDocument;
    ///
    /// let policy = PolicyDocument::cross_account_read("src-bucket", "arn:aws:iam::123456789012:user/copier");
    /// let resources = &policy.statement[0].resource;
    /// assert_eq!(resources[0], "arn:aws:s3:::src-bucket");
    /// assert_eq!(resources[1], "arn:aws:s3:::src-bucket/*");
    /// ```
    #[must_use]
    pub fn cross_account_read(bucket: &str, principal_arn: &str) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: vec![PolicyStatement {
                effect: "Allow".to_owned(),
                principal: Principal {
                    aws: principal_arn.to_owned(),
                },
                action: READ_ACTIONS.iter().map(|a| (*a).to_owned()).collect(),
                resource: vec![bucket_arn(bucket), format!("{}/*", bucket_arn(bucket))],
            }],
        }
    }

    /// Serialize the document to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// ARN of an S3 bucket.
#[must_use]
pub fn bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}
