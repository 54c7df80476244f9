//! Startup sequence for the Tidal binary.
//!
//! # Design
//! - Config problems degrade to defaults and surface as a dialog; they never abort startup.
//! - Engine startup failure is fatal and returned to `main`.
//! - The session is shut down even when the shell loop fails.

use std::path::Path;

use clap::Parser;
use tidal_config::ConfigStore;
use tidal_engine::{LocalEngine, TorrentEngine};
use tidal_telemetry::{LoggingConfig, app_span, init_logging};
use tracing::{Instrument, info, warn};

use crate::cli::Cli;
use crate::error::{AppError, AppResult};
use crate::session::SessionHolder;
use crate::shell::{CommandRegistry, ConsoleFrontend, Dialog, Frontend, Shell, Window};

/// Parse flags, install logging, and run the console shell against the local engine.
///
/// # Errors
///
/// Returns an error if logging cannot be installed, the engine session fails to start,
/// or the console cannot be driven.
pub async fn run_app() -> AppResult<()> {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format(),
        build_sha: option_env!("TIDAL_BUILD_SHA").unwrap_or("dev"),
    };
    init_logging(&logging).map_err(|err| AppError::telemetry("telemetry.init_logging", err))?;

    let mut frontend = ConsoleFrontend::stdio();
    run_shell(&cli.config, &LocalEngine::new(), &mut frontend)
        .instrument(app_span("console"))
        .await
}

/// Load settings from `config_path`, start a session on `engine`, and drive `frontend`
/// until the user quits or input ends.
///
/// # Errors
///
/// Returns an error if the engine session cannot be started or stopped, or the frontend fails.
pub async fn run_shell(
    config_path: &Path,
    engine: &dyn TorrentEngine,
    frontend: &mut dyn Frontend,
) -> AppResult<()> {
    let store = ConfigStore::new(config_path);
    let (settings, issue) = store.load().into_parts();
    if let Some(err) = &issue {
        warn!(
            path = %store.path().display(),
            error = %err,
            kind = ?err.kind(),
            "using default settings"
        );
    }

    let holder = SessionHolder::start(engine, settings)
        .await
        .map_err(|err| AppError::engine("session.start", err))?;

    let dialog = issue.as_ref().map(Dialog::config_error);
    let mut shell = Shell::new(Window::main(), CommandRegistry::with_defaults(), dialog);
    let ran = shell
        .run(frontend)
        .await
        .map_err(|err| AppError::shell("shell.run", err));

    let stopped = holder
        .shutdown()
        .await
        .map_err(|err| AppError::engine("session.shutdown", err));
    info!("shell exited");

    ran?;
    stopped
}
