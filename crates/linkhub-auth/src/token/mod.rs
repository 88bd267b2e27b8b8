//! Signed link tokens: `payload.signature`, both base64url without padding.

pub mod codec;
pub mod signer;

use std::fmt;

pub use codec::LinkPayload;
pub use signer::Signer;

use crate::error::LinkError;

/// A token split into its two segments. Shape-checked only; says nothing
/// about authenticity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    /// Base64url-encoded payload.
    pub payload: String,
    /// Base64url-encoded HMAC tag over `payload`.
    pub signature: String,
}

impl SignedToken {
    /// Assemble a token from already-encoded segments.
    pub fn new(payload: String, signature: String) -> Self {
        Self { payload, signature }
    }

    /// Split `raw` into segments. Exactly one `.` is allowed and both sides
    /// must be non-empty runs of `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Result<Self, LinkError> {
        let (payload, signature) = raw.split_once('.').ok_or(LinkError::MalformedToken)?;
        if !is_url_safe(payload) || !is_url_safe(signature) {
            return Err(LinkError::MalformedToken);
        }
        Ok(Self::new(payload.to_string(), signature.to_string()))
    }
}

impl fmt::Display for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.payload, self.signature)
    }
}

fn is_url_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
