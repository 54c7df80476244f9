//! Ownership of the live engine session.
//!
//! # Design
//! - Holds the settings a session was started with alongside the session itself.
//! - Startup errors are returned untouched; the caller decides they are fatal.

use tidal_config::Settings;
use tidal_engine::{EngineResult, EngineSession, TorrentEngine};
use tracing::info;

use crate::engine_config::engine_config_from_settings;

/// The running engine session and the settings that created it.
pub struct SessionHolder {
    settings: Settings,
    session: Box<dyn EngineSession>,
}

impl SessionHolder {
    /// Translate `settings` and start a session on `engine`.
    ///
    /// # Errors
    ///
    /// Returns the engine's startup error unchanged.
    pub async fn start(engine: &dyn TorrentEngine, settings: Settings) -> EngineResult<Self> {
        let config = engine_config_from_settings(&settings);
        let session = engine.start(config).await?;
        info!(
            engine = engine.name(),
            listen_addr = %session.listen_addr(),
            "engine session ready"
        );
        Ok(Self { settings, session })
    }

    /// Settings the session was started with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The live session.
    #[must_use]
    pub fn session(&self) -> &dyn EngineSession {
        self.session.as_ref()
    }

    /// Flush and stop the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub async fn shutdown(mut self) -> EngineResult<()> {
        self.session.shutdown().await
    }
}

impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SessionHolder")
            .field("listen_addr", &self.session.listen_addr())
            .field("dht_addr", &self.session.dht_addr())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::error::Error;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tidal_engine::{EngineConfig, EngineError};

    #[derive(Default)]
    struct Recorded {
        started: Option<EngineConfig>,
        shutdowns: usize,
    }

    struct RecordingEngine {
        recorded: Arc<Mutex<Recorded>>,
        fail: bool,
    }

    struct RecordingSession {
        config: EngineConfig,
        recorded: Arc<Mutex<Recorded>>,
    }

    #[async_trait]
    impl TorrentEngine for RecordingEngine {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn start(&self, config: EngineConfig) -> EngineResult<Box<dyn EngineSession>> {
            if self.fail {
                return Err(EngineError::PortUnavailable {
                    host: config.session.host,
                    begin: config.session.port_begin,
                    end: config.session.port_end,
                });
            }
            if let Ok(mut recorded) = self.recorded.lock() {
                recorded.started = Some(config.clone());
            }
            Ok(Box::new(RecordingSession {
                config,
                recorded: Arc::clone(&self.recorded),
            }))
        }
    }

    #[async_trait]
    impl EngineSession for RecordingSession {
        fn config(&self) -> &EngineConfig {
            &self.config
        }

        fn listen_addr(&self) -> SocketAddr {
            SocketAddr::from(([127, 0, 0, 1], self.config.session.port_begin))
        }

        fn dht_addr(&self) -> Option<SocketAddr> {
            None
        }

        async fn flush(&self) -> EngineResult<()> {
            Ok(())
        }

        async fn shutdown(&mut self) -> EngineResult<()> {
            if let Ok(mut recorded) = self.recorded.lock() {
                recorded.shutdowns += 1;
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_passes_translated_config() -> Result<(), Box<dyn Error>> {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let engine = RecordingEngine {
            recorded: Arc::clone(&recorded),
            fail: false,
        };
        let mut settings = Settings::default();
        settings.port_begin = 45_000;

        let holder = SessionHolder::start(&engine, settings.clone()).await?;
        assert_eq!(holder.settings(), &settings);
        assert_eq!(holder.session().listen_addr().port(), 45_000);
        assert_eq!(holder.session().config(), &engine_config_from_settings(&settings));
        holder.shutdown().await?;

        let recorded = recorded.lock().map_err(|_| "poisoned")?;
        assert_eq!(recorded.started, Some(engine_config_from_settings(&settings)));
        assert_eq!(recorded.shutdowns, 1);
        Ok(())
    }

    #[tokio::test]
    async fn startup_error_is_returned_unchanged() {
        let engine = RecordingEngine {
            recorded: Arc::new(Mutex::new(Recorded::default())),
            fail: true,
        };
        let result = SessionHolder::start(&engine, Settings::default()).await;
        assert!(matches!(
            result,
            Err(EngineError::PortUnavailable {
                begin: 20_000,
                end: 30_000,
                ..
            })
        ));
    }
}
