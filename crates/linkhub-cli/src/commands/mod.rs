//! CLI command definitions and dispatch.

pub mod config;
pub mod inspect;
pub mod mint;
pub mod upload;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use linkhub_core::config::AppConfig;
use linkhub_core::error::AppError;

/// LinkHub: signed short links and job status tracking
#[derive(Debug, Parser)]
#[command(name = "linkhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file. Without it, `config/default.toml`,
    /// `config/{LINKHUB_ENV}.toml` and the environment are merged.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mint a signed short link without going through the server
    Mint(mint::MintArgs),
    /// Decode a link token and check it against the configured secret
    Inspect(inspect::InspectArgs),
    /// Upload a file to the storage zone
    Upload(upload::UploadArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config_path = self.config.as_deref();
        match &self.command {
            Commands::Mint(args) => mint::execute(args, config_path, self.format),
            Commands::Inspect(args) => inspect::execute(args, config_path, self.format),
            Commands::Upload(args) => upload::execute(args, config_path, self.format).await,
            Commands::Config(args) => config::execute(args, config_path, self.format),
        }
    }
}

/// Helper: load configuration from an explicit file or the default layers
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::load_file(path),
        None => {
            let env = std::env::var("LINKHUB_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}
