//! Link resolving: token in, redirect target out.

use std::sync::Arc;

use tracing::{debug, warn};

use linkhub_auth::{LinkError, LinkPayload, SignedToken, Signer};
use linkhub_core::traits::{Clock, ObjectLocator};

/// A successfully resolved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Object path carried in the token.
    pub path: String,
    /// Redirect target.
    pub target: String,
    /// Expiry, unix seconds.
    pub expires_at: i64,
}

/// Verifies tokens statelessly. Nothing is recorded between calls.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    signer: Signer,
    locator: Arc<dyn ObjectLocator>,
    clock: Arc<dyn Clock>,
}

impl LinkResolver {
    pub fn new(signer: Signer, locator: Arc<dyn ObjectLocator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            signer,
            locator,
            clock,
        }
    }

    /// Resolve `raw` against the current time.
    pub fn resolve(&self, raw: &str) -> Result<ResolvedLink, LinkError> {
        let result = self.resolve_at(raw, self.clock.unix_now());
        match &result {
            Ok(link) => debug!(path = %link.path, "Resolved link"),
            Err(LinkError::Configuration(message)) => {
                warn!(reason = %message, "Link resolution unavailable")
            }
            Err(err) => debug!(reason = %err, "Rejected link"),
        }
        result
    }

    /// Resolve `raw` as of `now` (unix seconds).
    ///
    /// The signature is always checked before the payload is decoded, so an
    /// unauthenticated payload is never parsed.
    pub fn resolve_at(&self, raw: &str, now: i64) -> Result<ResolvedLink, LinkError> {
        if !self.signer.is_configured() {
            return Err(LinkError::Configuration(
                "Link signing secret is not configured".into(),
            ));
        }
        if !self.locator.is_configured() {
            return Err(LinkError::Configuration(
                "Pull zone base URL is not configured".into(),
            ));
        }

        let token = SignedToken::parse(raw)?;
        if !self.signer.verify(&token.payload, &token.signature)? {
            return Err(LinkError::InvalidSignature);
        }
        let payload = LinkPayload::decode(&token.payload)?;
        if now > payload.expires_at {
            return Err(LinkError::Expired);
        }

        let target = self
            .locator
            .locate(&payload.path)
            .map_err(|e| LinkError::Configuration(e.message))?;

        Ok(ResolvedLink {
            path: payload.path,
            target,
            expires_at: payload.expires_at,
        })
    }
}
