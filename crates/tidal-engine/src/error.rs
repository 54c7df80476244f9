//! Error types for engine startup and session control.
//!
//! # Design
//! - Constant messages; operational context lives in fields.
//! - Startup failures are reported as-is so callers never need to interpret engine internals.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A parameter cannot be used to start a session.
    #[error("invalid engine configuration")]
    InvalidConfig {
        /// Parameter name.
        field: &'static str,
        /// Machine-readable reason.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// A filesystem operation failed.
    #[error("engine filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The session database exists but cannot be decoded.
    #[error("session database is corrupt")]
    Database {
        /// Database path.
        path: PathBuf,
        /// Source decode error.
        source: serde_json::Error,
    },
    /// No port in the configured range could be bound.
    #[error("no listen port available")]
    PortUnavailable {
        /// Bind address.
        host: String,
        /// First port tried.
        begin: u16,
        /// Last port tried.
        end: u16,
    },
    /// Binding a socket failed.
    #[error("failed to bind socket")]
    Bind {
        /// Operation identifier.
        operation: &'static str,
        /// Address that could not be bound.
        addr: String,
        /// Source IO error.
        source: io::Error,
    },
    /// The session has already been shut down.
    #[error("engine session closed")]
    SessionClosed {
        /// Operation attempted on the closed session.
        operation: &'static str,
    },
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn messages_are_constant_and_sources_preserved() {
        let cases = vec![
            (
                EngineError::InvalidConfig {
                    field: "port_begin",
                    reason: "zero",
                    value: Some("0".to_string()),
                },
                "invalid engine configuration",
                false,
            ),
            (
                EngineError::Io {
                    operation: "data_dir.create",
                    path: PathBuf::from("/data"),
                    source: io::Error::other("denied"),
                },
                "engine filesystem operation failed",
                true,
            ),
            (
                EngineError::PortUnavailable {
                    host: "0.0.0.0".to_string(),
                    begin: 1,
                    end: 2,
                },
                "no listen port available",
                false,
            ),
            (
                EngineError::Bind {
                    operation: "dht.bind",
                    addr: "0.0.0.0:7246".to_string(),
                    source: io::Error::from(io::ErrorKind::AddrInUse),
                },
                "failed to bind socket",
                true,
            ),
            (
                EngineError::SessionClosed { operation: "flush" },
                "engine session closed",
                false,
            ),
        ];

        for (err, message, has_source) in cases {
            assert_eq!(err.to_string(), message);
            assert_eq!(err.source().is_some(), has_source);
        }
    }
}
