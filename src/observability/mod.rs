//! Observability for the catalog server
//!
//! Structured logging through `tracing`. The subscriber is installed once by
//! the CLI; library code only emits events.
//!
//! Filtering follows `RUST_LOG`, falling back to [`DEFAULT_FILTER`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "bookshelf=info,tower_http=info";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (e.g. by a test
/// harness); logging then goes to the existing one.
pub fn init_logging(format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.is_ok()
}
