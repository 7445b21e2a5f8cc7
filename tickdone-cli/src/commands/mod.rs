//! Command implementations for the tickdone CLI

pub mod migrate;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tickdone_server::{AppConfig, DatabaseSettings};

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use serve::run_serve;

/// Config file selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to config file (default: ~/.tickdone/config.toml)
    #[arg(long, short = 'c', env = "TICKDONE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the config file and resolve the database provider.
    ///
    /// Any failure here must stop the process before it serves traffic.
    pub fn load(&self) -> Result<(AppConfig, DatabaseSettings)> {
        let config = AppConfig::load(self.config.as_deref()).context("Failed to load configuration")?;
        let settings = config
            .database_settings()
            .context("Invalid database configuration")?;

        tracing::info!(provider = %settings.provider, "Database provider selected");
        Ok((config, settings))
    }
}
