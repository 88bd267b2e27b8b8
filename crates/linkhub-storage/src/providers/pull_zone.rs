//! Pull-zone (CDN) locator.

use linkhub_core::error::AppError;
use linkhub_core::result::AppResult;
use linkhub_core::traits::storage::ObjectLocator;

use crate::paths::join_url;

/// Resolves object paths against the pull-zone base URL.
#[derive(Debug, Clone)]
pub struct PullZone {
    base_url: String,
}

impl PullZone {
    /// Trailing slashes on `base_url` are dropped. An empty base yields an
    /// unconfigured locator.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ObjectLocator for PullZone {
    fn locate(&self, path: &str) -> AppResult<String> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration("Pull zone base URL is not configured"));
        }
        Ok(join_url(&self.base_url, path))
    }

    fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}
