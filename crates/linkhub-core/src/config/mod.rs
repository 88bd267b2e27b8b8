//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files plus `LINKHUB__*` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod admin;
pub mod app;
pub mod events;
pub mod links;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::admin::{AdminConfig, RequestLimitConfig};
pub use self::app::{CorsConfig, ServerConfig};
pub use self::events::EventsConfig;
pub use self::links::LinksConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Built once at startup and shared read-only (behind `Arc`) by every
/// component that needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Signed link settings.
    #[serde(default)]
    pub links: LinksConfig,
    /// Admin credential and throttling settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Object storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// In-memory job event store settings.
    #[serde(default)]
    pub events: EventsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml` and environment
    /// variables prefixed with `LINKHUB` (`__` separates nested keys, e.g.
    /// `LINKHUB__LINKS__SIGNING_SECRET`). All files are optional.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::build(builder)
    }

    /// Load configuration from an explicit file path plus the environment.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let builder =
            config::Config::builder().add_source(config::File::with_name(path).required(true));
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("LINKHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config.normalized())
    }

    /// Trim secrets, strip trailing slashes from base URLs and fill in the
    /// public base default.
    pub fn normalized(mut self) -> Self {
        self.links.signing_secret = self.links.signing_secret.trim().to_string();
        self.links.pull_base = trim_base(&self.links.pull_base);
        self.links.public_base = trim_base(&self.links.public_base);
        if self.links.public_base.is_empty() {
            self.links.public_base = format!("http://localhost:{}", self.server.port);
        }
        self.admin.api_token = self.admin.api_token.trim().to_string();
        self.storage.password = self.storage.password.trim().to_string();
        self.storage.endpoint = trim_base(&self.storage.endpoint);
        self
    }

    /// Returns human-readable warnings for settings whose absence disables
    /// a feature at runtime.
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.links.signing_secret.is_empty() {
            warnings.push("links.signing_secret is not set; link minting and resolving are disabled");
        }
        if self.links.pull_base.is_empty() {
            warnings.push("links.pull_base is not set; link minting and resolving are disabled");
        }
        if self.admin.api_token.is_empty() {
            warnings.push("admin.api_token is not set; admin endpoints will reject every request");
        }
        warnings
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
