//! CLI command implementations
//!
//! `serve` follows a fixed boot sequence: load config, apply overrides,
//! install logging, construct the store, serve until shutdown.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::catalog::BookStore;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability;

use super::args::{Command, ServeArgs};
use super::errors::{CliError, CliResult};

/// Load configuration from file.
///
/// A missing file yields the defaults; an unreadable or malformed one is an
/// error.
pub fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HttpServerConfig::default()),
        Err(e) => {
            return Err(CliError::config_error(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
}

/// Resolve the effective configuration: file first, then CLI/env overrides
pub fn resolve_config(args: &ServeArgs) -> CliResult<HttpServerConfig> {
    let mut config = load_config(&args.config)?;

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = &args.static_dir {
        config.static_dir = dir.clone();
    }
    if args.no_seed {
        config.seed_sample_books = false;
    }

    Ok(config)
}

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve(args) => serve(&args).await,
        Command::Config(args) => print_config(&args),
    }
}

/// Start the HTTP server and block until shutdown
pub async fn serve(args: &ServeArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    if !observability::init_logging(config.log_format) {
        tracing::debug!(
            log_format = %config.log_format,
            "subscriber already installed, log_format ignored"
        );
    }

    let store = if config.seed_sample_books {
        BookStore::with_sample_books()
    } else {
        BookStore::new()
    };
    tracing::info!(
        books = store.len(),
        config = %args.config.display(),
        "catalog initialized"
    );

    HttpServer::new(config, store)
        .start()
        .await
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Print the effective configuration as pretty JSON
pub fn print_config(args: &ServeArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
