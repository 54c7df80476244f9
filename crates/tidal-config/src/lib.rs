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

//! File-backed settings store for the Tidal shell.
//!
//! Layout: `model.rs` (the user-facing `Settings` record), `duration.rs` (duration
//! encoding), `defaults.rs` (compiled-in values), `store.rs` (`ConfigStore` load/save),
//! `validate.rs` (non-mutating sanity checks), `error.rs` (error taxonomy).

pub mod defaults;
mod duration;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;

pub use defaults::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, SCHEMA_VERSION};
pub use error::{ConfigError, ConfigErrorKind, ConfigResult};
pub use model::{Settings, SettingsDocument};
pub use store::{ConfigStore, LoadedSettings};
pub use validate::{SettingsWarning, validate_settings};
