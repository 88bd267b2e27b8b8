//! HMAC-SHA256 signer for encoded link payloads.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::compare::constant_time_eq;
use crate::error::LinkError;

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies encoded payloads with the process-wide secret.
///
/// Constructed even when the secret is missing so the service can start;
/// every call then fails with [`LinkError::Configuration`].
#[derive(Clone)]
pub struct Signer {
    key: Option<Arc<[u8]>>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl Signer {
    /// Creates a signer. An empty secret yields an unconfigured signer.
    pub fn new(secret: &str) -> Self {
        let key = (!secret.is_empty()).then(|| Arc::from(secret.as_bytes()));
        Self { key }
    }

    /// Whether a secret is present.
    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Base64url HMAC tag over the ASCII bytes of `encoded_payload`.
    pub fn sign(&self, encoded_payload: &str) -> Result<String, LinkError> {
        let mut mac = self.mac()?;
        mac.update(encoded_payload.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    /// Recomputes the tag and compares it with `signature` in constant time.
    pub fn verify(&self, encoded_payload: &str, signature: &str) -> Result<bool, LinkError> {
        let expected = self.sign(encoded_payload)?;
        Ok(constant_time_eq(expected.as_bytes(), signature.as_bytes()))
    }

    fn mac(&self) -> Result<HmacSha256, LinkError> {
        let key = self
            .key
            .as_deref()
            .ok_or_else(|| LinkError::Configuration("Link signing secret is not configured".into()))?;
        HmacSha256::new_from_slice(key)
            .map_err(|_| LinkError::Configuration("Link signing secret is unusable".into()))
    }
}
