//! Bridge configuration, loaded from YAML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 6790;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interface the bridge binds to
    pub host: String,
    pub port: u16,
    /// Where raw hierarchy dumps come from
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            source: SourceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Re-read a dump file on every snapshot
    File { path: PathBuf },
    /// Run a command whose stdout is the dump
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    /// Fixed dump embedded in the config
    Inline { xml: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Command {
            program: "adb".to_string(),
            args: ["exec-out", "uiautomator", "dump", "/dev/tty"]
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        }
    }
}
