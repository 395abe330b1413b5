//! Archlens MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use anyhow::Context;
use archlens::QueryFacade;
use archlens::config::ArchlensConfig;
use archlens_mcp::ArchlensMcpServer;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Archlens MCP server over stdio.
#[derive(Parser, Debug)]
#[command(name = "archlens-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, value_name = "FILE", env = "ARCHLENS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("archlens_mcp=info,archlens=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = ArchlensConfig::load_or_default(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    let facade = Arc::new(QueryFacade::with_limits(config.limits));

    tracing::info!(limits = ?config.limits, "Starting archlens-mcp server");

    let server = ArchlensMcpServer::new(facade);
    server.run().await?;

    Ok(())
}
