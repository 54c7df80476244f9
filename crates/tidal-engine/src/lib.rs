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

//! Engine-facing parameter set, session contract, and the built-in local engine.
//!
//! Layout: `config.rs` (`EngineConfig` sections), `defaults.rs` (fixed parameter tables),
//! `session.rs` (`TorrentEngine`/`EngineSession` traits), `local/` (in-process engine),
//! `error.rs` (engine error taxonomy).

pub mod config;
pub mod defaults;
pub mod error;
pub mod local;
pub mod session;

pub use config::{
    DhtOptions, EngineConfig, IoOptions, PeerOptions, RpcOptions, SessionOptions,
    TrackerOptions, WebseedOptions,
};
pub use error::{EngineError, EngineResult};
pub use local::LocalEngine;
pub use session::{EngineSession, TorrentEngine};
