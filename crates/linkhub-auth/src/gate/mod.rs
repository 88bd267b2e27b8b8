//! Admin gate: shared bearer credential plus failed-attempt limiting.

pub mod limiter;

use std::sync::Arc;

use tracing::warn;

pub use limiter::FailureLimiter;

use crate::compare::constant_time_eq;
use crate::error::LinkError;

/// Decides whether a request may reach an admin operation.
#[derive(Debug, Clone)]
pub struct AdminGate {
    credential: Option<Arc<str>>,
    limiter: FailureLimiter,
}

impl AdminGate {
    /// An empty credential leaves the gate closed to everyone.
    pub fn new(credential: &str, limiter: FailureLimiter) -> Self {
        let credential = (!credential.is_empty()).then(|| Arc::from(credential));
        Self {
            credential,
            limiter,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    pub fn limiter(&self) -> &FailureLimiter {
        &self.limiter
    }

    /// Check `presented` for `caller`.
    ///
    /// Order is configuration, then the caller's block, then the credential.
    /// A blocked caller is refused even with the right credential.
    pub fn authorize(&self, caller: &str, presented: Option<&str>) -> Result<(), LinkError> {
        let Some(expected) = self.credential.as_deref() else {
            return Err(LinkError::Configuration(
                "Admin API token is not configured".into(),
            ));
        };

        if self.limiter.is_limited(caller) {
            warn!(caller = %caller, "Admin request refused: caller is rate limited");
            return Err(LinkError::RateLimited);
        }

        let matches = presented
            .is_some_and(|token| constant_time_eq(token.as_bytes(), expected.as_bytes()));
        if !matches {
            self.limiter.record_failure(caller);
            warn!(
                caller = %caller,
                credential_present = presented.is_some(),
                "Admin authentication failed"
            );
            return Err(LinkError::Unauthorized);
        }

        Ok(())
    }
}

/// Extract the credential from an `Authorization: Bearer <token>` value.
/// The scheme is matched case-insensitively.
pub fn bearer_token(header: &str) -> Option<&str> {
    let scheme = header.get(..7)?;
    if !scheme.eq_ignore_ascii_case("Bearer ") {
        return None;
    }
    Some(header[7..].trim()).filter(|token| !token.is_empty())
}
