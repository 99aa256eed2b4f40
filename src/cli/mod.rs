pub mod app;
pub mod commands;
pub mod dispatch;
pub mod dump;
pub mod env;
pub mod runtime;
pub mod serve;

pub use app::run;
pub use dump::{cmd_dump, DumpArgs};
pub use serve::{cmd_serve, ServeArgs};
