//! CLI module for flatcrud
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - serve: Start the item HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, resolve_config, run, run_command, serve, ServeOverrides};
pub use errors::{CliError, CliErrorCode, CliResult};
