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

//! Binary entrypoint that loads settings, starts the engine session, and runs the
//! console shell.

use tidal_app::{AppResult, run_app};

/// Bootstraps Tidal and blocks until the shell exits.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
