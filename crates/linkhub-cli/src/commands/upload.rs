//! File upload to the storage zone.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;
use linkhub_core::traits::{ObjectUploader, SystemClock};
use linkhub_storage::{BunnyStorageProvider, normalize_object_path, upload_key};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Object path inside the storage zone. Defaults to a timestamped key
    /// under the configured upload prefix.
    #[arg(short, long)]
    pub path: Option<String>,

    /// Content type. Defaults to a guess from the file name.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Also mint a short link to the uploaded object
    #[arg(long)]
    pub link: bool,

    /// Lifetime of the minted link in seconds
    #[arg(long, requires = "link")]
    pub expires_in: Option<u64>,
}

/// Result of an upload
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct UploadRow {
    #[tabled(rename = "Path")]
    pub path: String,
    #[tabled(rename = "Size (bytes)")]
    pub size: u64,
    #[tabled(rename = "Content type")]
    pub content_type: String,
    #[tabled(rename = "Provider")]
    pub provider: String,
    #[tabled(rename = "Short URL")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_url: String,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    let content = tokio::fs::read(&args.file).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            AppError::not_found(format!("File not found: {}", args.file.display()))
        }
        _ => AppError::from(e),
    })?;
    let size = content.len() as u64;

    let path = object_path(args, &config, Utc::now());
    let content_type = content_type(args);

    let provider = BunnyStorageProvider::from_config(&config.storage)?;
    tracing::info!(path = %path, size, "Uploading");
    provider.put(&path, Bytes::from(content), &content_type).await?;

    let short_url = if args.link {
        super::mint::issuer(&config, Arc::new(SystemClock))
            .mint(&path, args.expires_in)?
            .short_url
    } else {
        String::new()
    };

    if format == OutputFormat::Table {
        output::print_success(&format!("Uploaded '{}' ({size} bytes)", args.file.display()));
    }
    output::print_item(
        &UploadRow {
            path,
            size,
            content_type,
            provider: provider.provider_type().to_string(),
            short_url,
        },
        format,
    );
    Ok(())
}

/// Object path for the upload: the explicit `--path` without leading
/// slashes, or a generated key.
fn object_path(args: &UploadArgs, config: &AppConfig, now: DateTime<Utc>) -> String {
    match args.path.as_deref() {
        Some(path) => normalize_object_path(path).unwrap_or_default().to_string(),
        None => upload_key(&config.storage.upload_prefix, &file_name(&args.file), now),
    }
}

fn content_type(args: &UploadArgs) -> String {
    args.content_type
        .clone()
        .filter(|ct| !ct.trim().is_empty())
        .unwrap_or_else(|| {
            mime_guess::from_path(&args.file)
                .first_or_octet_stream()
                .to_string()
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
