//! Integration tests for the bucket cloner.
//!
//! These tests require an S3-compatible server with bucket policy and STS
//! support at `localhost:4566` (override with `S3_ENDPOINT_URL`). They are
//! marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p bucket-cloner-integration -- --ignored
//! ```

use std::sync::{Arc, Once};
use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

use bucket_cloner_aws::{S3Storage, StsCallerIdentity};
use bucket_cloner_core::Cloner;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

fn credentials() -> Credentials {
    Credentials::new("test", "test", None, None, "integration-test")
}

/// Create a configured S3 client pointing at the local server.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Create a configured STS client pointing at the local server.
#[must_use]
pub fn sts_client() -> aws_sdk_sts::Client {
    init_tracing();

    let config = aws_sdk_sts::config::Builder::new()
        .behavior_version(aws_sdk_sts::config::BehaviorVersion::latest())
        .region(aws_sdk_sts::config::Region::new("us-east-1"))
        .credentials_provider(credentials())
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_sts::Client::from_conf(config)
}

/// Build a cloner between two buckets on the local server.
#[must_use]
pub fn local_cloner(source_bucket: &str, destination_bucket: &str) -> Cloner {
    let client = s3_client();
    Cloner::new(
        Arc::new(S3Storage::new(client.clone())),
        Arc::new(S3Storage::new(client)),
        Arc::new(StsCallerIdentity::new(sts_client())),
        source_bucket,
        destination_bucket,
    )
    .with_propagation_delay(Duration::from_millis(10))
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Put each `(key, body)` pair into `bucket`.
pub async fn put_objects(client: &aws_sdk_s3::Client, bucket: &str, objects: &[(&str, &str)]) {
    for (key, body) in objects {
        client
            .put_object()
            .bucket(bucket)
            .key(*key)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .send()
            .await
            .unwrap_or_else(|e| panic!("put {key}: {e}"));
    }
}

/// Read an object body as a string.
pub async fn read_object(client: &aws_sdk_s3::Client, bucket: &str, key: &str) -> String {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .unwrap_or_else(|e| panic!("get {key}: {e}"));
    let data = resp
        .body
        .collect()
        .await
        .expect("collect body")
        .into_bytes();
    String::from_utf8(data.to_vec()).expect("utf-8 body")
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let mut continuation_token = None;
    loop {
        let mut req = client.list_objects_v2().bucket(bucket);
        if let Some(token) = continuation_token.take() {
            req = req.continuation_token(token);
        }
        let Ok(resp) = req.send().await else {
            return; // Bucket may not exist.
        };

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
        } else {
            break;
        }
    }

    let _ = client.delete_bucket_policy().bucket(bucket).send().await;
    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_clone;
