//! Object storage capabilities.
//!
//! The link subsystem never talks to the storage backend. It only needs to
//! turn an object path into a fetchable URL ([`ObjectLocator`]). Uploading
//! is a separate capability ([`ObjectUploader`]) used by tooling.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Builds fetchable resource URLs for stored objects.
pub trait ObjectLocator: Send + Sync + std::fmt::Debug + 'static {
    /// Return the public URL for `path`, or a configuration error when the
    /// locator has no base URL.
    fn locate(&self, path: &str) -> AppResult<String>;

    /// Whether the locator is usable.
    fn is_configured(&self) -> bool;
}

/// Writes objects into the storage backend.
#[async_trait]
pub trait ObjectUploader: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "bunny").
    fn provider_type(&self) -> &str;

    /// Upload `data` to `path` (relative to the storage zone).
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<()>;
}
