//! Admin credential and throttling configuration.

use serde::{Deserialize, Serialize};

/// Admin API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Shared bearer token required by admin endpoints.
    #[serde(default)]
    pub api_token: String,
    /// Failed attempts allowed per caller inside the sliding window.
    #[serde(default = "default_max_failures")]
    pub max_failed_attempts: usize,
    /// Sliding window length for failed attempts, in seconds.
    #[serde(default = "default_failure_window")]
    pub failure_window_seconds: u64,
    /// General request rate limit applied to `/api/*`.
    #[serde(default)]
    pub request_limit: RequestLimitConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            max_failed_attempts: default_max_failures(),
            failure_window_seconds: default_failure_window(),
            request_limit: RequestLimitConfig::default(),
        }
    }
}

/// Token bucket settings for the per-client API request limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLimitConfig {
    /// Whether the limit is enforced.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests allowed per minute per client.
    #[serde(default = "default_per_minute")]
    pub per_minute: u32,
}

impl Default for RequestLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_minute: default_per_minute(),
        }
    }
}

fn default_max_failures() -> usize {
    10
}

fn default_failure_window() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_per_minute() -> u32 {
    60
}
