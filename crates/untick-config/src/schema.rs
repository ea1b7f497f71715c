//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub sweep: SweepConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How to reach the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// CDP HTTP endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Launch Chrome when nothing answers on the endpoint.
    #[serde(default)]
    pub launch: bool,

    #[serde(default)]
    pub headless: bool,

    /// Profile directory for a launched Chrome.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,

    /// Chrome executable; searched for when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            launch: false,
            headless: false,
            profile_dir: None,
            chrome_path: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Which page to sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Attach to the first page whose URL contains this text.
    #[serde(default)]
    pub url_contains: Option<String>,

    /// Open this URL in a new tab instead of attaching.
    #[serde(default)]
    pub open_url: Option<String>,
}

/// Sweep tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,

    #[serde(default = "default_stable_passes")]
    pub stable_passes: u32,

    /// Pause after each click, in milliseconds.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Pause after each scroll, in milliseconds.
    #[serde(default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    #[serde(default = "default_min_scroll_px")]
    pub min_scroll_px: f64,

    #[serde(default = "default_scroll_fraction")]
    pub scroll_fraction: f64,

    #[serde(default = "default_overflow_slack_px")]
    pub overflow_slack_px: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
            stable_passes: default_stable_passes(),
            settle_ms: default_settle_ms(),
            scroll_pause_ms: default_scroll_pause_ms(),
            min_scroll_px: default_min_scroll_px(),
            scroll_fraction: default_scroll_fraction(),
            overflow_slack_px: default_overflow_slack_px(),
        }
    }
}

fn default_max_passes() -> u32 {
    80
}

fn default_stable_passes() -> u32 {
    4
}

fn default_settle_ms() -> u64 {
    25
}

fn default_scroll_pause_ms() -> u64 {
    200
}

fn default_min_scroll_px() -> f64 {
    300.0
}

fn default_scroll_fraction() -> f64 {
    0.8
}

fn default_overflow_slack_px() -> f64 {
    50.0
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; console only when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
