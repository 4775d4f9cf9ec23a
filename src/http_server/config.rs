//! HTTP Server Configuration
//!
//! Bind address, static asset directory, seeding and log output settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for paths outside the API (default: "public")
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Start with the sample catalog (default: true)
    #[serde(default = "default_seed_sample_books")]
    pub seed_sample_books: bool,

    /// Log output format (default: pretty)
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_seed_sample_books() -> bool {
    true
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            seed_sample_books: default_seed_sample_books(),
            log_format: LogFormat::default(),
        }
    }
}

impl HttpServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Static directory, if it exists on disk
    pub fn existing_static_dir(&self) -> Option<&Path> {
        let dir = self.static_dir.as_path();
        dir.is_dir().then_some(dir)
    }
}
