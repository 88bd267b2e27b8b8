//! Response DTOs.

use serde::{Deserialize, Serialize};

use linkhub_service::MintedLink;

/// Mint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub short_url: String,
    pub target: String,
    pub exp: i64,
}

impl From<MintedLink> for LinkResponse {
    fn from(link: MintedLink) -> Self {
        Self {
            short_url: link.short_url,
            target: link.target,
            exp: link.exp,
        }
    }
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// True when links can be minted and resolved.
    pub ok: bool,
    /// API version.
    pub version: String,
    /// Non-secret view of the configuration.
    pub env: HealthEnv,
}

/// Configuration presence flags. Never carries secret values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEnv {
    pub port: u16,
    pub public_base: String,
    pub pull_base_set: bool,
    pub signing_set: bool,
    pub admin_set: bool,
}
