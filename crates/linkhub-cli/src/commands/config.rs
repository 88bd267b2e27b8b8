//! Configuration management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;

/// Settings never printed in clear.
const SECRET_POINTERS: [&str; 3] = [
    "/links/signing_secret",
    "/admin/api_token",
    "/storage/password",
];

const REDACTED: &str = "****";

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Load the configuration and report missing settings
    Validate,
}

/// One flattened setting
#[derive(Debug, Serialize, Tabled)]
pub struct SettingRow {
    #[tabled(rename = "Setting")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            let view = redacted(&config)?;
            match format {
                OutputFormat::Json => output::print_json(&view),
                OutputFormat::Table => output::print_list(&flatten(&view), format),
            }
        }
        ConfigCommand::Validate => {
            let config = match super::load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {}", e.message));
                    return Err(e);
                }
            };

            output::print_success(&format!(
                "Configuration '{}' loaded",
                config_path.unwrap_or("config/")
            ));
            output::print_kv(
                "Server",
                &format!("{}:{}", config.server.host, config.server.port),
            );
            output::print_kv("Public base", &config.links.public_base);
            output::print_kv("Pull base", or_unset(&config.links.pull_base));
            output::print_kv(
                "Storage",
                &if config.storage.zone.is_empty() {
                    "unset".to_string()
                } else {
                    format!("{}/{}", config.storage.endpoint, config.storage.zone)
                },
            );

            let warnings = config.warnings();
            for warning in &warnings {
                output::print_warning(warning);
            }
            if warnings.is_empty() {
                output::print_success("All required settings are present");
            }
        }
    }

    Ok(())
}

/// The configuration as JSON with every secret replaced by a mask. Unset
/// secrets stay empty so the output still shows what is missing.
pub fn redacted(config: &AppConfig) -> Result<Value, AppError> {
    let mut value = serde_json::to_value(config)?;

    for pointer in SECRET_POINTERS {
        if let Some(secret) = value.pointer_mut(pointer) {
            let set = secret.as_str().is_some_and(|s| !s.is_empty());
            if set {
                *secret = Value::String(REDACTED.to_string());
            }
        }
    }
    Ok(value)
}

/// Flatten nested JSON into dotted keys.
fn flatten(value: &Value) -> Vec<SettingRow> {
    let mut rows = Vec::new();
    flatten_into(value, String::new(), &mut rows);
    rows
}

fn flatten_into(value: &Value, prefix: String, rows: &mut Vec<SettingRow>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, key, rows);
            }
        }
        Value::String(s) => rows.push(SettingRow {
            key: prefix,
            value: s.clone(),
        }),
        other => rows.push(SettingRow {
            key: prefix,
            value: other.to_string(),
        }),
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "unset" } else { value }
}
