//! Object storage backend configuration.

use serde::{Deserialize, Serialize};

/// Storage zone settings used by the uploader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage API endpoint (scheme + host).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Storage zone name.
    #[serde(default)]
    pub zone: String,
    /// Storage zone password, sent as the `AccessKey` header.
    #[serde(default)]
    pub password: String,
    /// Prefix prepended to generated upload paths.
    #[serde(default = "default_upload_prefix")]
    pub upload_prefix: String,
    /// Upload request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            zone: String::new(),
            password: String::new(),
            upload_prefix: default_upload_prefix(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "https://storage.bunnycdn.com".to_string()
}

fn default_upload_prefix() -> String {
    "jobs/".to_string()
}

fn default_timeout() -> u64 {
    60
}
