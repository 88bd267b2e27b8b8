//! Link and gate error taxonomy.

use linkhub_core::error::{AppError, ErrorKind};

/// Every way minting, resolving or gating can fail.
///
/// Display strings are what callers see; they never carry parser details.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Required server configuration (secret, base URL, admin token) is absent.
    #[error("{0}")]
    Configuration(String),
    /// The mint request itself is invalid.
    #[error("{0}")]
    InvalidRequest(String),
    /// The token does not have the `payload.signature` shape.
    #[error("Bad token")]
    MalformedToken,
    /// The signature does not match the payload.
    #[error("Invalid signature")]
    InvalidSignature,
    /// The signed payload could not be decoded.
    #[error("Bad payload")]
    MalformedPayload,
    /// The link was valid but its expiry has passed.
    #[error("Link expired")]
    Expired,
    /// Missing or wrong admin credential.
    #[error("Unauthorized")]
    Unauthorized,
    /// Too many failed admin attempts from this caller.
    #[error("Too many failed attempts, try again later")]
    RateLimited,
}

impl LinkError {
    /// The application error kind this maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidRequest(_) | Self::MalformedToken | Self::MalformedPayload => {
                ErrorKind::Validation
            }
            Self::InvalidSignature | Self::Unauthorized => ErrorKind::Authentication,
            Self::Expired => ErrorKind::Gone,
            Self::RateLimited => ErrorKind::RateLimit,
        }
    }
}

impl From<LinkError> for AppError {
    fn from(err: LinkError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}
