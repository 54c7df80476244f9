//! Session contract between the shell and a torrent engine.

use std::net::SocketAddr;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Constructs engine sessions. This is the whole contract with the engine.
#[async_trait]
pub trait TorrentEngine: Send + Sync {
    /// Engine implementation identifier used in logs.
    fn name(&self) -> &'static str;

    /// Start a session with the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine refuses the configuration or cannot acquire
    /// its resources (ports, database, storage).
    async fn start(&self, config: EngineConfig) -> EngineResult<Box<dyn EngineSession>>;
}

/// A running engine session.
#[async_trait]
pub trait EngineSession: Send + Sync {
    /// Configuration the session was started with.
    fn config(&self) -> &EngineConfig;

    /// Address the peer listener is bound to.
    fn listen_addr(&self) -> SocketAddr;

    /// Address of the DHT node, when enabled.
    fn dht_addr(&self) -> Option<SocketAddr>;

    /// Persist session state immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written or the session is closed.
    async fn flush(&self) -> EngineResult<()>;

    /// Flush state and release every resource held by the session.
    ///
    /// Calling this on an already stopped session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    async fn shutdown(&mut self) -> EngineResult<()>;
}
