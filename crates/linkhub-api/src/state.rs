//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use linkhub_auth::{AdminGate, FailureLimiter, Signer};
use linkhub_core::config::AppConfig;
use linkhub_core::traits::{Clock, ObjectLocator, SystemClock};
use linkhub_service::{EventStore, LinkIssuer, LinkResolver};
use linkhub_storage::PullZone;

use crate::middleware::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or internally shared for cheap cloning.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Mints signed links
    pub issuer: Arc<LinkIssuer>,
    /// Verifies signed links
    pub resolver: Arc<LinkResolver>,
    /// Admin credential check and failed-attempt limiter
    pub gate: Arc<AdminGate>,
    /// Volatile job event store
    pub events: Arc<EventStore>,
    /// `/api` request limiter, absent when disabled
    pub request_limiter: Option<RateLimiter>,
}

impl AppState {
    /// Wire every component from configuration using the system clock.
    pub fn from_config(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wire every component from configuration with an explicit clock.
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let signer = Signer::new(&config.links.signing_secret);
        let locator: Arc<dyn ObjectLocator> = Arc::new(PullZone::new(&config.links.pull_base));

        let issuer = LinkIssuer::new(
            signer.clone(),
            Arc::clone(&locator),
            &config.links.public_base,
            Arc::clone(&clock),
        );
        let resolver = LinkResolver::new(signer, Arc::clone(&locator), Arc::clone(&clock));

        let gate = AdminGate::new(
            &config.admin.api_token,
            FailureLimiter::new(
                config.admin.max_failed_attempts,
                Duration::from_secs(config.admin.failure_window_seconds),
            ),
        );

        let events = EventStore::new(config.events.clone(), clock);

        let limit = &config.admin.request_limit;
        let request_limiter =
            (limit.enabled && limit.per_minute > 0).then(|| RateLimiter::per_minute(limit.per_minute));

        Self {
            config: Arc::new(config),
            issuer: Arc::new(issuer),
            resolver: Arc::new(resolver),
            gate: Arc::new(gate),
            events: Arc::new(events),
            request_limiter,
        }
    }
}
