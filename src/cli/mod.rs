pub mod args;
pub mod commands;

pub use args::{Cli, Commands, StationArgs};
pub use commands::{resolve_config, run};
