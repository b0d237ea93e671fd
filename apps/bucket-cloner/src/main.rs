//! Bucket Cloner - copy an S3 bucket into another account.
//!
//! Grants the destination identity temporary read access to the source
//! bucket, copies every object server-side, then removes the grant.
//!
//! # Usage
//!
//! ```text
//! bucket-cloner [SETTINGS_PATH]
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SETTINGS_FILE` | `settings.yaml` | Bucket settings (overridden by `SETTINGS_PATH`) |
//! | `PROPAGATION_DELAY_MICROS` | `500` | Pause between grant and listing |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bucket_cloner_core::{CloneReport, ClonerConfig, Settings};

/// Version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Resolve the settings path: first positional argument, else `SETTINGS_FILE`.
fn settings_path(config: &ClonerConfig, mut args: impl Iterator<Item = String>) -> PathBuf {
    args.nth(1)
        .map_or_else(|| PathBuf::from(&config.settings_file), PathBuf::from)
}

async fn run(config: &ClonerConfig, path: PathBuf) -> Result<CloneReport> {
    let settings = Settings::load(&path)?;

    let cloner = bucket_cloner_aws::cloner_from_settings(&settings)
        .await
        .with_context(|| format!("invalid settings in {}", path.display()))?
        .with_propagation_delay(config.propagation_delay());

    let report = cloner.clone_bucket().await?;
    Ok(report)
}

fn log_report(report: &CloneReport) {
    for failure in &report.failed {
        warn!(key = %failure.key, error = %failure.source, "object was not copied");
    }
    if report.truncated {
        warn!(
            listed = report.listed,
            "source listing was truncated, remaining objects were not copied"
        );
    }
    if !report.policy_revoked {
        error!("temporary access policy could not be removed from the source bucket");
    }

    info!(
        listed = report.listed,
        copied = report.copied.len(),
        failed = report.failed.len(),
        complete = report.is_complete(),
        "clone summary",
    );
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = ClonerConfig::from_env();

    init_tracing(&config.log_level)?;

    let path = settings_path(&config, std::env::args());

    info!(
        settings = %path.display(),
        propagation_delay_micros = config.propagation_delay_micros,
        version = VERSION,
        "starting Bucket Cloner",
    );

    match run(&config, path).await {
        Ok(report) => {
            log_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "bucket clone failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
