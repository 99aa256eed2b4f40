use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use ui_snapshot::XmlHierarchy;
use wd_bridge::WebDriverBridge;

use crate::config::Config;
use crate::source::build_source;

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Interface to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,
}

pub async fn cmd_serve(args: ServeArgs, config: Config) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.host.clone());
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    let hierarchy = XmlHierarchy::new(build_source(&config.source));
    let router = WebDriverBridge::new(hierarchy).build();

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, source = ?config.source, "ui hierarchy bridge listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("bridge server failed")?;

    info!("bridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
