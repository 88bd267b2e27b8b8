//! Link issuing: path and TTL in, signed short link out.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use linkhub_auth::{LinkError, LinkPayload, SignedToken, Signer};
use linkhub_core::traits::{Clock, ObjectLocator};
use linkhub_storage::{join_url, normalize_object_path};

/// Shortest lifetime a link can be minted with, in seconds.
pub const MIN_TTL_SECS: u64 = 60;
/// Longest lifetime a link can be minted with, in seconds.
pub const MAX_TTL_SECS: u64 = 86_400;
/// Lifetime used when none (or zero) is requested.
pub const DEFAULT_TTL_SECS: u64 = 600;

/// Clamp a requested TTL into `[MIN_TTL_SECS, MAX_TTL_SECS]`. `None` and
/// `Some(0)` both mean "use the default".
pub fn effective_ttl(requested: Option<u64>) -> u64 {
    match requested {
        None | Some(0) => DEFAULT_TTL_SECS,
        Some(ttl) => ttl.clamp(MIN_TTL_SECS, MAX_TTL_SECS),
    }
}

/// A freshly minted link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintedLink {
    /// `payload.signature`.
    pub token: String,
    /// Public redirect URL carrying the token.
    pub short_url: String,
    /// Where the link redirects to.
    pub target: String,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Mints signed links. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct LinkIssuer {
    signer: Signer,
    locator: Arc<dyn ObjectLocator>,
    public_base: String,
    clock: Arc<dyn Clock>,
}

impl LinkIssuer {
    /// Creates a new issuer. `public_base` is the externally visible origin
    /// the redirect route is served from.
    pub fn new(
        signer: Signer,
        locator: Arc<dyn ObjectLocator>,
        public_base: &str,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            signer,
            locator,
            public_base: public_base.trim_end_matches('/').to_string(),
            clock,
        }
    }

    /// Mint a link for `path` valid for the clamped `ttl`.
    pub fn mint(&self, path: &str, ttl: Option<u64>) -> Result<MintedLink, LinkError> {
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
        let path = normalize_object_path(path)
            .ok_or_else(|| LinkError::InvalidRequest("path required".into()))?;

        let ttl = effective_ttl(ttl);
        let exp = self.clock.unix_now().saturating_add(ttl as i64);

        let encoded = LinkPayload::new(path, exp).encode()?;
        let signature = self.signer.sign(&encoded)?;
        let token = SignedToken::new(encoded, signature).to_string();

        let target = self
            .locator
            .locate(path)
            .map_err(|e| LinkError::Configuration(e.message))?;
        let short_url = join_url(&self.public_base, &format!("l/{token}"));

        info!(path, ttl, exp, "Minted link");

        Ok(MintedLink {
            token,
            short_url,
            target,
            exp,
        })
    }
}
