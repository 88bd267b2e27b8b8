//! Job event store configuration.

use serde::{Deserialize, Serialize};

/// In-memory job event store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Maximum number of events retained in the recent-event log.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Maximum number of events retained per job.
    #[serde(default = "default_per_job")]
    pub per_job_capacity: usize,
    /// A worker counts as online if it reported within this many seconds.
    #[serde(default = "default_online_window")]
    pub online_window_seconds: i64,
    /// Estimated bandwidth price per GB, used by the summary.
    #[serde(default = "default_price")]
    pub price_per_gb: f64,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            per_job_capacity: default_per_job(),
            online_window_seconds: default_online_window(),
            price_per_gb: default_price(),
        }
    }
}

fn default_capacity() -> usize {
    5_000
}

fn default_per_job() -> usize {
    50
}

fn default_online_window() -> i64 {
    300
}

fn default_price() -> f64 {
    0.01
}
