//! uia-bridge library
//!
//! Wires configuration, logging and raw snapshot sources around the
//! `ui-snapshot` core and the `wd-bridge` HTTP surface.

pub mod cli;
pub mod config;
pub mod source;

pub use config::{Config, SourceConfig};
pub use source::{build_source, CommandSource, FileSource};
