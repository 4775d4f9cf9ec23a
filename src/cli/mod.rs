//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - serve: Boot the catalog and serve HTTP until shutdown
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{load_config, print_config, resolve_config, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments, build the runtime and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(run_command(cli.command))
}
