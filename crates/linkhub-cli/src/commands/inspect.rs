//! Token inspection.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use linkhub_auth::{LinkPayload, SignedToken, Signer};
use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;
use linkhub_core::traits::{Clock, ObjectLocator, SystemClock};
use linkhub_service::LinkResolver;
use linkhub_storage::PullZone;

use super::mint::format_unix;

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Token, or a full short URL ending in `/l/{token}`
    pub token: String,
}

/// What a token says and whether the server would honor it
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct TokenReport {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Expires")]
    pub expires_at: String,
    #[tabled(rename = "Remaining (s)")]
    pub remaining_seconds: i64,
    #[tabled(rename = "Signature")]
    pub signature: String,
    #[tabled(rename = "Verdict")]
    pub verdict: String,
    #[tabled(rename = "Target")]
    pub target: String,
    #[tabled(skip)]
    pub valid: bool,
}

/// Execute the inspect command
///
/// Exits non-zero when the server would reject the token.
pub fn execute(
    args: &InspectArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let report = inspect_token(&config, &args.token, SystemClock.unix_now())?;
    output::print_item(&report, format);

    if report.valid {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Token rejected: {}",
            report.verdict
        )))
    }
}

/// Decode `raw` and check it as of `now`.
///
/// The payload is shown even when the signature does not verify, so a
/// token minted under another secret can still be read.
pub fn inspect_token(config: &AppConfig, raw: &str, now: i64) -> Result<TokenReport, AppError> {
    let raw = strip_short_url(raw);
    let token = SignedToken::parse(raw)?;
    let payload = LinkPayload::decode(&token.payload)?;

    let signer = Signer::new(&config.links.signing_secret);
    let signature = if !signer.is_configured() {
        "unchecked (no signing secret)"
    } else if signer.verify(&token.payload, &token.signature)? {
        "valid"
    } else {
        "invalid"
    };

    let locator = Arc::new(PullZone::new(&config.links.pull_base));
    let target = locator.locate(&payload.path).unwrap_or_default();

    let resolver = LinkResolver::new(signer, locator, Arc::new(SystemClock));
    let (valid, verdict) = match resolver.resolve_at(raw, now) {
        Ok(_) => (true, "valid".to_string()),
        Err(err) => (false, err.to_string()),
    };

    Ok(TokenReport {
        path: payload.path,
        expires_at: format_unix(payload.expires_at),
        remaining_seconds: payload.expires_at.saturating_sub(now),
        signature: signature.to_string(),
        verdict,
        target,
        valid,
    })
}

fn strip_short_url(raw: &str) -> &str {
    let raw = raw.trim();
    raw.rsplit_once("/l/")
        .map(|(_, token)| token)
        .unwrap_or(raw)
        .trim_end_matches('/')
}
