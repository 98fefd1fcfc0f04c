//! CLI argument definitions using clap
//!
//! Commands:
//! - flatcrud init --config <path>
//! - flatcrud serve --config <path> [--host H] [--port N] [--data-file P] [--in-memory]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// flatcrud - A minimal JSON item service over a flat file
#[derive(Parser, Debug)]
#[command(name = "flatcrud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./flatcrud.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file; defaults apply if it does not exist
        #[arg(long, default_value = "./flatcrud.json")]
        config: PathBuf,

        /// Host to bind, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,

        /// Backing data file, overrides the config file
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Keep items in memory only, seeded with a sample item
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
