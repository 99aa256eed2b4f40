use clap::Subcommand;

use super::dump::DumpArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Serve normalized snapshots over the WebDriver-style HTTP bridge
    Serve(ServeArgs),

    /// Take one normalized snapshot and print it as XML
    Dump(DumpArgs),
}
