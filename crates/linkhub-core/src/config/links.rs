//! Signed link configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by the link issuer and resolver.
///
/// TTL bounds are not configurable; see `linkhub_service::link`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksConfig {
    /// HMAC-SHA256 key used to sign and verify link tokens.
    #[serde(default)]
    pub signing_secret: String,
    /// Base URL of the public pull zone serving stored objects.
    #[serde(default)]
    pub pull_base: String,
    /// Public base URL of this service, used to build short URLs.
    /// Defaults to `http://localhost:{server.port}`.
    #[serde(default)]
    pub public_base: String,
}

impl LinksConfig {
    /// Whether a signing secret is configured.
    pub fn signing_set(&self) -> bool {
        !self.signing_secret.is_empty()
    }

    /// Whether a pull base URL is configured.
    pub fn pull_base_set(&self) -> bool {
        !self.pull_base.is_empty()
    }
}
