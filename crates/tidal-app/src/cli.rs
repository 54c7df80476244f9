//! Process-level flags.

use std::path::PathBuf;

use clap::Parser;
use tidal_config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use tidal_telemetry::{DEFAULT_LOG_LEVEL, LogFormat};

/// Tidal torrent client.
#[derive(Debug, Clone, Parser)]
#[command(name = "tidal", version, about = "Tidal torrent client")]
pub struct Cli {
    /// Settings file; created with defaults when missing.
    #[arg(long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Log level or `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[arg(long, env = "TIDAL_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Log output format (`pretty` or `json`); inferred from the build profile when unset.
    #[arg(long, env = "TIDAL_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Effective log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(LogFormat::infer)
    }
}
