//! # Design
//!
//! - Centralize application-level errors for bootstrap and the shell loop.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Config load problems never appear here; they degrade to defaults and a dialog.

use thiserror::Error;

use crate::shell::ShellError;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: tidal_telemetry::TelemetryError,
    },
    /// Engine session operations failed.
    #[error("engine operation failed")]
    Engine {
        /// Operation identifier.
        operation: &'static str,
        /// Source engine error.
        source: tidal_engine::EngineError,
    },
    /// Shell event loop failed.
    #[error("shell operation failed")]
    Shell {
        /// Operation identifier.
        operation: &'static str,
        /// Source shell error.
        source: ShellError,
    },
}

impl AppError {
    pub(crate) const fn telemetry(
        operation: &'static str,
        source: tidal_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn engine(
        operation: &'static str,
        source: tidal_engine::EngineError,
    ) -> Self {
        Self::Engine { operation, source }
    }

    pub(crate) const fn shell(operation: &'static str, source: ShellError) -> Self {
        Self::Shell { operation, source }
    }
}
