use anyhow::Result;

use super::dump::cmd_dump;
use super::env::CliArgs;
use super::serve::cmd_serve;
use crate::cli::commands::Commands;
use crate::config::Config;

pub async fn dispatch(cli: &CliArgs, config: Config) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve(args) => cmd_serve(args, config).await,
        Commands::Dump(args) => cmd_dump(args, config).await,
    }
}
