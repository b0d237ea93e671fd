//! Runtime configuration.
//!
//! Provides [`ClonerConfig`], the process-level knobs that are not part of
//! the bucket settings file. Values are loaded from environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default pause between granting the policy and listing the bucket.
pub const DEFAULT_PROPAGATION_DELAY: Duration = Duration::from_micros(500);

/// Runtime configuration for a clone run.
///
/// # Examples
///
/// ```
/// use bucket_cloner_core::ClonerConfig;
///
/// let config = ClonerConfig::default();
/// assert_eq!(config.settings_file, "settings.yaml");
/// assert_eq!(config.propagation_delay().as_micros(), 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClonerConfig {
    /// Path of the YAML bucket settings file.
    #[builder(default = String::from("settings.yaml"))]
    pub settings_file: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Pause after the policy grant, in microseconds.
    #[builder(default = 500)]
    pub propagation_delay_micros: u64,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self {
            settings_file: String::from("settings.yaml"),
            log_level: String::from("info"),
            propagation_delay_micros: 500,
        }
    }
}

impl ClonerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `SETTINGS_FILE` | `settings.yaml` |
    /// | `LOG_LEVEL` | `info` |
    /// | `PROPAGATION_DELAY_MICROS` | `500` |
    ///
    /// Unparseable numeric values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SETTINGS_FILE") {
            config.settings_file = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("PROPAGATION_DELAY_MICROS") {
            if let Ok(n) = v.parse::<u64>() {
                config.propagation_delay_micros = n;
            }
        }

        config
    }

    /// The propagation delay as a [`Duration`].
    #[must_use]
    pub fn propagation_delay(&self) -> Duration {
        Duration::from_micros(self.propagation_delay_micros)
    }
}
