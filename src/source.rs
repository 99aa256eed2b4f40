//! Concrete raw snapshot sources.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;
use ui_snapshot::{RawSnapshotSource, SnapshotError, SnapshotResult, StaticSource};

use crate::config::SourceConfig;

pub fn build_source(config: &SourceConfig) -> Arc<dyn RawSnapshotSource> {
    match config {
        SourceConfig::File { path } => Arc::new(FileSource::new(path.clone())),
        SourceConfig::Command { program, args } => {
            Arc::new(CommandSource::new(program.clone(), args.clone()))
        }
        SourceConfig::Inline { xml } => Arc::new(StaticSource::new(xml.clone())),
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RawSnapshotSource for FileSource {
    fn window_hierarchy(&self) -> SnapshotResult<String> {
        std::fs::read_to_string(&self.path).map_err(|err| {
            SnapshotError::unavailable(format!("failed to read {}: {err}", self.path.display()))
        })
    }
}

/// Runs a dump command per snapshot, e.g. `adb exec-out uiautomator dump /dev/tty`.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl RawSnapshotSource for CommandSource {
    fn window_hierarchy(&self) -> SnapshotResult<String> {
        debug!(program = %self.program, args = ?self.args, "requesting hierarchy dump");
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                SnapshotError::unavailable(format!("failed to run {}: {err}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SnapshotError::unavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(strip_dump_trailer(&stdout).to_string())
    }
}

// `uiautomator dump /dev/tty` appends a status line after the document.
fn strip_dump_trailer(raw: &str) -> &str {
    match raw.rfind('>') {
        Some(end) => &raw[..=end],
        None => raw,
    }
}
