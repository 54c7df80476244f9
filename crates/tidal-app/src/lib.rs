#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Tidal application wiring.
//!
//! Layout: `bootstrap.rs` (startup sequence), `cli.rs` (process flags),
//! `engine_config.rs` (settings to engine parameters), `session.rs` (live session holder),
//! `shell/` (window, toolbar commands, dialogs, console frontend), `error.rs`.

/// Application bootstrap.
pub mod bootstrap;
/// Command-line flags and environment fallbacks.
pub mod cli;
/// Settings to engine configuration translation.
pub mod engine_config;
/// Application error types.
pub mod error;
/// Live engine session ownership.
pub mod session;
/// Shell window, commands, and frontends.
pub mod shell;

pub use bootstrap::{run_app, run_shell};
pub use cli::Cli;
pub use engine_config::engine_config_from_settings;
pub use error::{AppError, AppResult};
pub use session::SessionHolder;
