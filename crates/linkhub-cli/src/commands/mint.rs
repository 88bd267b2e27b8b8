//! Offline link minting.

use std::sync::Arc;

use chrono::DateTime;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use linkhub_auth::Signer;
use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;
use linkhub_core::traits::{Clock, SystemClock};
use linkhub_service::{LinkIssuer, MintedLink};
use linkhub_storage::PullZone;

/// Arguments for the mint command
#[derive(Debug, Args)]
pub struct MintArgs {
    /// Object path inside the pull zone
    #[arg(short, long)]
    pub path: String,

    /// Link lifetime in seconds (clamped to 60..=86400, default 600)
    #[arg(short, long)]
    pub expires_in: Option<u64>,
}

/// A minted link as printed by the CLI
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct LinkRow {
    #[tabled(rename = "Short URL")]
    pub short_url: String,
    #[tabled(rename = "Target")]
    pub target: String,
    #[tabled(rename = "Expires")]
    pub expires_at: String,
    #[tabled(skip)]
    pub exp: i64,
}

impl From<MintedLink> for LinkRow {
    fn from(link: MintedLink) -> Self {
        Self {
            short_url: link.short_url,
            target: link.target,
            expires_at: format_unix(link.exp),
            exp: link.exp,
        }
    }
}

/// Build an issuer from configuration, the same way the server does.
pub fn issuer(config: &AppConfig, clock: Arc<dyn Clock>) -> LinkIssuer {
    LinkIssuer::new(
        Signer::new(&config.links.signing_secret),
        Arc::new(PullZone::new(&config.links.pull_base)),
        &config.links.public_base,
        clock,
    )
}

/// Execute the mint command
pub fn execute(
    args: &MintArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let link = issuer(&config, Arc::new(SystemClock)).mint(&args.path, args.expires_in)?;
    output::print_item(&LinkRow::from(link), format);
    Ok(())
}

/// RFC 3339 rendering of a unix timestamp.
pub fn format_unix(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| secs.to_string())
}
