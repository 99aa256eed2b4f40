use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, load_config, LoadedConfig};

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    init_logging(&cli.log_level, cli.debug)?;

    info!(
        git = env!("GIT_HASH"),
        built = env!("BUILD_DATE"),
        "Starting uia-bridge v{}",
        env!("CARGO_PKG_VERSION")
    );

    let LoadedConfig { config, .. } = load_config(cli.config.as_ref()).await?;

    match dispatch(&cli, config).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("Command failed: {:#}", err);
            Err(err)
        }
    }
}
