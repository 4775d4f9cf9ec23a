//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf serve [--config <path>] [--host <host>] [--port <port>] [--static-dir <dir>] [--no-seed]
//! - bookshelf config [--config <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a small in-memory library catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print the effective configuration and exit
    Config(ServeArgs),
}

/// Options shared by `serve` and `config`
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Path to configuration file (missing file means defaults)
    #[arg(long, default_value = "./bookshelf.json")]
    pub config: PathBuf,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding the static front-end
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Start with an empty catalog
    #[arg(long)]
    pub no_seed: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
