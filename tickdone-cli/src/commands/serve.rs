//! HTTP server command
//!
//! Resolves configuration, connects the configured store and runs the
//! task API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use tickdone_server::{connect, run_server};

use super::ConfigArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Address to bind to (overrides config, default: 127.0.0.1:5080)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let (config, settings) = args.config.load()?;

    let mut server_config = config.server_config();
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind;
    }
    server_config.cors_permissive |= args.cors_permissive;

    tracing::info!("Starting tickdone server on {}", server_config.bind_addr);

    let store = connect(&settings)
        .await
        .context("Failed to connect to database")?;

    // Run server (blocks until shutdown)
    run_server(store, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
