//! Application-level span helpers.

use tracing::Span;

use crate::init::build_sha;

/// Top-level span carrying the running mode and build identifier.
///
/// Attach it to the application future with `tracing::Instrument` so every event
/// emitted during the run inherits the fields.
#[must_use]
pub fn app_span(mode: &str) -> Span {
    tracing::info_span!("app", mode = %mode, build_sha = %build_sha())
}
