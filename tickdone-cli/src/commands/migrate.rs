//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use tickdone_server::connect;

use super::ConfigArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Create the task table for the configured provider and exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let (_, settings) = args.config.load()?;

    // connect() runs the migration before returning the store
    connect(&settings)
        .await
        .context("Failed to migrate database")?;

    println!("Database ready ({})", settings.provider);
    Ok(())
}
