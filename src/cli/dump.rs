use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::fs;
use tracing::info;
use ui_snapshot::{RawSnapshotSource, XmlHierarchy};

use crate::config::Config;
use crate::source::{build_source, FileSource};

#[derive(Args, Clone)]
pub struct DumpArgs {
    /// Normalize this raw dump file instead of the configured source
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the normalized XML here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub async fn cmd_dump(args: DumpArgs, config: Config) -> Result<()> {
    let source: Arc<dyn RawSnapshotSource> = match &args.input {
        Some(path) => Arc::new(FileSource::new(path.clone())),
        None => build_source(&config.source),
    };
    let hierarchy = XmlHierarchy::new(source);

    let document = tokio::task::spawn_blocking(move || hierarchy.normalized_snapshot())
        .await
        .context("snapshot task failed")??;
    let xml = document.to_xml_string()?;

    match args.output {
        Some(path) => {
            fs::write(&path, &xml)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = xml.len(), "wrote normalized snapshot");
        }
        None => println!("{xml}"),
    }
    Ok(())
}
