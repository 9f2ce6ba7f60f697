//! Renote REST server.
//!
//! Serves a workspace directory over HTTP. Settings come from `renote.toml`
//! and can be overridden by flags or environment variables.
//!
//! Set `RUST_LOG=renote_server=debug,renote_core=debug` for request logs.

use anyhow::{Context, Result};
use clap::Parser;
use renote_core::Workspace;
use renote_server::{Config, RenoteServer};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Note workspace server with stable document ids
#[derive(Parser, Debug)]
#[command(name = "renote", version, about)]
struct Args {
    /// Configuration file (default: the user config directory)
    #[arg(short, long, env = "RENOTE_CONFIG")]
    config: Option<PathBuf>,

    /// Workspace root directory
    #[arg(short, long, env = "RENOTE_ROOT")]
    root: Option<PathBuf>,

    /// UI-facing path prefix, e.g. /workspace
    #[arg(long, env = "RENOTE_DISPLAY_PREFIX")]
    display_prefix: Option<String>,

    /// Address to bind to
    #[arg(short, long, env = "RENOTE_BIND")]
    bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, env = "RENOTE_PORT")]
    port: Option<u16>,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(root) = self.root {
            config.root = root;
        }
        if let Some(prefix) = self.display_prefix {
            config.display_prefix = prefix;
        }
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);

    let workspace = Workspace::open(&config.root, &config.display_prefix)
        .with_context(|| format!("Failed to open workspace at {}", config.root.display()))?;

    let server = RenoteServer::start(Arc::new(workspace), config.server_config())
        .await
        .context("Failed to start server")?;
    tracing::info!(url = %server.url(), root = ?config.root, "Renote server running");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    server.stop().await;
    Ok(())
}
