//! Token bucket rate limiter middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

use linkhub_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::state::AppState;

type NowFn = Arc<dyn Fn() -> Instant + Send + Sync>;

/// In-memory token bucket rate limiter keyed by client.
#[derive(Clone)]
pub struct RateLimiter {
    /// Client → bucket state.
    buckets: Arc<DashMap<String, TokenBucket>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    now: NowFn,
}

#[derive(Debug, Clone, Copy)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_tokens", &self.max_tokens)
            .field("refill_rate", &self.refill_rate)
            .field("tracked", &self.buckets.len())
            .finish()
    }
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self::new_with_now(max_tokens, refill_rate, Arc::new(Instant::now))
    }

    pub fn new_with_now(max_tokens: u32, refill_rate: f64, now: NowFn) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            max_tokens,
            refill_rate,
            now,
        }
    }

    /// A limiter allowing `per_minute` requests per client, with a burst of
    /// the same size.
    pub fn per_minute(per_minute: u32) -> Self {
        Self::new(per_minute, f64::from(per_minute) / 60.0)
    }

    /// Attempts to consume a token for the given key.
    pub fn check(&self, key: &str) -> bool {
        let now = (self.now)();
        let max = f64::from(self.max_tokens);
        let mut bucket = self.buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max,
            last_refill: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(max);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Forget clients idle for longer than `max_idle`.
    pub fn sweep(&self, max_idle: Duration) {
        let now = (self.now)();
        self.buckets
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) <= max_idle);
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Rejects clients that have used up their request budget.
pub async fn rate_limit(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    request: Request,
    next: Next,
) -> Response {
    let limited = state
        .request_limiter
        .as_ref()
        .is_some_and(|limiter| !limiter.check(&ip));
    if limited {
        tracing::warn!(client_ip = %ip, path = %request.uri().path(), "Request rate limit exceeded");
        return ApiError::from(AppError::rate_limited("Too many requests, slow down"))
            .into_response();
    }
    next.run(request).await
}
