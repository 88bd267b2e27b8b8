//! Aggregate view over recent job events.

use chrono::{DateTime, Utc};
use serde::Serialize;

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Jobs grouped by their latest reported state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCounts {
    pub queued: u64,
    pub running: u64,
    pub done: u64,
    pub error: u64,
}

/// Dashboard summary for the last 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
    /// Events recorded in the last 24 hours.
    pub events_24h: u64,
    /// Jobs active in the last 24 hours, by latest state.
    pub jobs: JobCounts,
    /// Distinct workers that reported within the online window.
    pub workers_online: u64,
    /// Distinct users that reported in the last 24 hours.
    pub users_active: u64,
    /// Bytes reported in the last 24 hours.
    pub bandwidth_bytes: u64,
    /// `bandwidth_bytes` in GB times the configured price per GB.
    pub estimated_cost: f64,
}

/// Estimated bandwidth cost, rounded to four decimal places.
pub fn estimate_cost(bytes: u64, price_per_gb: f64) -> f64 {
    let cost = bytes as f64 / BYTES_PER_GB * price_per_gb;
    (cost * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_with_bytes() {
        assert_eq!(estimate_cost(0, 0.01), 0.0);
        assert_eq!(estimate_cost(1_000_000_000, 0.01), 0.01);
        assert_eq!(estimate_cost(250_000_000_000, 0.01), 2.5);
        assert_eq!(estimate_cost(1_000_000_000, 0.0), 0.0);
    }
}
