//! Link payload codec: compact JSON, then base64url without padding.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// What a link points at and until when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPayload {
    /// Object key inside the pull zone, without a leading slash.
    #[serde(rename = "p")]
    pub path: String,
    /// Expiry as unix seconds.
    #[serde(rename = "e")]
    pub expires_at: i64,
}

impl LinkPayload {
    /// Creates a payload.
    pub fn new(path: impl Into<String>, expires_at: i64) -> Self {
        Self {
            path: path.into(),
            expires_at,
        }
    }

    /// Encode into a URL-safe token segment.
    pub fn encode(&self) -> Result<String, LinkError> {
        let json = serde_json::to_vec(self).map_err(|_| LinkError::MalformedPayload)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a token segment. Any base64, JSON or field problem is a
    /// [`LinkError::MalformedPayload`].
    pub fn decode(segment: &str) -> Result<Self, LinkError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| LinkError::MalformedPayload)?;
        let payload: Self =
            serde_json::from_slice(&bytes).map_err(|_| LinkError::MalformedPayload)?;
        if payload.path.is_empty() {
            return Err(LinkError::MalformedPayload);
        }
        Ok(payload)
    }
}
