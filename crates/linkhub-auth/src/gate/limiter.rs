//! Per-caller failed-attempt limiter for the admin gate.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

type NowFn = Arc<dyn Fn() -> Instant + Send + Sync>;

/// Sliding-window log of failed admin attempts keyed by caller identity.
///
/// A caller is limited once `max_failures` failures fall inside `window`.
/// Successful attempts are never recorded, so they cannot lift a block.
#[derive(Clone)]
pub struct FailureLimiter {
    inner: Arc<Inner>,
}

struct Inner {
    failures: DashMap<String, VecDeque<Instant>>,
    max_failures: usize,
    window: Duration,
    now: NowFn,
}

impl std::fmt::Debug for FailureLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailureLimiter")
            .field("max_failures", &self.inner.max_failures)
            .field("window", &self.inner.window)
            .field("tracked", &self.len())
            .finish()
    }
}

impl FailureLimiter {
    /// `max_failures == 0` disables limiting.
    pub fn new(max_failures: usize, window: Duration) -> Self {
        Self::new_with_now(max_failures, window, Arc::new(Instant::now))
    }

    pub fn new_with_now(max_failures: usize, window: Duration, now: NowFn) -> Self {
        Self {
            inner: Arc::new(Inner {
                failures: DashMap::new(),
                max_failures,
                window,
                now,
            }),
        }
    }

    /// Whether `caller` has used up its failures for the current window.
    pub fn is_limited(&self, caller: &str) -> bool {
        if self.inner.max_failures == 0 {
            return false;
        }
        let now = (self.inner.now)();
        match self.inner.failures.get_mut(caller) {
            Some(mut log) => {
                self.prune(&mut log, now);
                log.len() >= self.inner.max_failures
            }
            None => false,
        }
    }

    /// Record one failed attempt for `caller`.
    pub fn record_failure(&self, caller: &str) {
        if self.inner.max_failures == 0 {
            return;
        }
        let now = (self.inner.now)();
        let mut log = self.inner.failures.entry(caller.to_string()).or_default();
        self.prune(&mut log, now);
        log.push_back(now);
        // Older entries beyond the threshold add nothing.
        while log.len() > self.inner.max_failures {
            log.pop_front();
        }
    }

    /// Drop callers whose failures have all aged out of the window.
    pub fn sweep(&self) {
        let now = (self.inner.now)();
        let window = self.inner.window;
        self.inner.failures.retain(|_, log| {
            while log
                .front()
                .is_some_and(|at| now.saturating_duration_since(*at) >= window)
            {
                log.pop_front();
            }
            !log.is_empty()
        });
    }

    /// Number of callers currently tracked.
    pub fn len(&self) -> usize {
        self.inner.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&self, log: &mut VecDeque<Instant>, now: Instant) {
        while log
            .front()
            .is_some_and(|at| now.saturating_duration_since(*at) >= self.inner.window)
        {
            log.pop_front();
        }
    }
}
