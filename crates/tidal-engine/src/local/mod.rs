//! In-process engine that acquires the session's resources.
//!
//! # Design
//! - Startup owns every fallible step: path expansion, data directory, peer listener port
//!   scan, the DHT socket, and finally the session database.
//! - The database is opened only once every socket is bound, so a failed start is not counted.
//! - A background worker persists resume data on the configured interval.
//! - Shutdown is explicit and idempotent; dropping a session still lets the worker flush once.

mod database;
mod worker;

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use self::database::SessionDatabase;
use self::worker::WorkerCommand;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::session::{EngineSession, TorrentEngine};

/// Engine that runs inside the application process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

impl LocalEngine {
    /// Construct the engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TorrentEngine for LocalEngine {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn start(&self, config: EngineConfig) -> EngineResult<Box<dyn EngineSession>> {
        let session = LocalSession::start(config).await?;
        Ok(Box::new(session))
    }
}

struct LocalSession {
    config: EngineConfig,
    listen_addr: SocketAddr,
    dht_addr: Option<SocketAddr>,
    listener: Option<TcpListener>,
    dht_socket: Option<UdpSocket>,
    commands: Option<mpsc::Sender<WorkerCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl LocalSession {
    async fn start(config: EngineConfig) -> EngineResult<Self> {
        let options = &config.session;
        if options.resume_write_interval.is_zero() {
            return Err(EngineError::InvalidConfig {
                field: "session.resume_write_interval",
                reason: "zero",
                value: None,
            });
        }
        let host = parse_host("session.host", &options.host)?;

        let data_dir = expand_home(&options.data_dir);
        create_data_dir(&data_dir, options.file_permissions).await?;

        let listener = bind_listener(host, options.port_begin, options.port_end).await?;
        let listen_addr = local_addr(&listener, "listener.local_addr")?;

        let (dht_socket, dht_addr) = if config.dht.enabled {
            let socket = bind_dht(&config.dht.host, config.dht.port).await?;
            let addr = socket.local_addr().map_err(|source| EngineError::Bind {
                operation: "dht.local_addr",
                addr: format!("{}:{}", config.dht.host, config.dht.port),
                source,
            })?;
            (Some(socket), Some(addr))
        } else {
            (None, None)
        };

        let database = SessionDatabase::open(expand_home(&options.database)).await?;
        info!(
            session_id = %database.state().session_id,
            start_count = database.state().start_count,
            path = %database.path().display(),
            "session database opened"
        );

        let (sender, receiver) = mpsc::channel(worker::COMMAND_CAPACITY);
        let handle = worker::spawn(database, receiver, options.resume_write_interval);

        info!(
            listen_addr = %listen_addr,
            dht_addr = ?dht_addr,
            data_dir = %data_dir.display(),
            "engine session started"
        );

        Ok(Self {
            config,
            listen_addr,
            dht_addr,
            listener: Some(listener),
            dht_socket,
            commands: Some(sender),
            worker: Some(handle),
        })
    }

    async fn request<F>(&self, operation: &'static str, build: F) -> EngineResult<()>
    where
        F: FnOnce(oneshot::Sender<EngineResult<()>>) -> WorkerCommand + Send,
    {
        let sender = self
            .commands
            .as_ref()
            .ok_or(EngineError::SessionClosed { operation })?;
        let (reply, response) = oneshot::channel();
        sender
            .send(build(reply))
            .await
            .map_err(|_| EngineError::SessionClosed { operation })?;
        response
            .await
            .map_err(|_| EngineError::SessionClosed { operation })?
    }
}

#[async_trait]
impl EngineSession for LocalSession {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    fn dht_addr(&self) -> Option<SocketAddr> {
        self.dht_addr
    }

    async fn flush(&self) -> EngineResult<()> {
        self.request("flush", |reply| WorkerCommand::Flush { reply })
            .await
    }

    async fn shutdown(&mut self) -> EngineResult<()> {
        if self.commands.is_none() {
            debug!("engine session already stopped");
            return Ok(());
        }

        let result = self
            .request("shutdown", |reply| WorkerCommand::Shutdown { reply })
            .await;
        self.commands = None;
        if let Some(handle) = self.worker.take() {
            join_worker(handle).await;
        }
        drop(self.listener.take());
        drop(self.dht_socket.take());
        info!(listen_addr = %self.listen_addr, "engine session stopped");
        result
    }
}

/// Wait for the resume worker; returns `false` when it panicked or was cancelled.
async fn join_worker(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, panicked = err.is_panic(), "resume worker ended abnormally");
            false
        }
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without the prefix, or without a `HOME` to expand to, are returned unchanged.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match std::env::var_os("HOME") {
        Some(home) => Path::new(&home).join(rest),
        None => PathBuf::from(path),
    }
}

fn parse_host(field: &'static str, host: &str) -> EngineResult<IpAddr> {
    host.parse::<IpAddr>()
        .map_err(|_| EngineError::InvalidConfig {
            field,
            reason: "not_an_ip_address",
            value: Some(host.to_string()),
        })
}

async fn create_data_dir(path: &Path, mode: u32) -> EngineResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|source| EngineError::Io {
            operation: "data_dir.create",
            path: path.to_path_buf(),
            source,
        })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .await
            .map_err(|source| EngineError::Io {
                operation: "data_dir.set_permissions",
                path: path.to_path_buf(),
                source,
            })?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

async fn bind_listener(host: IpAddr, begin: u16, end: u16) -> EngineResult<TcpListener> {
    if begin == 0 {
        return Err(EngineError::InvalidConfig {
            field: "session.port_begin",
            reason: "zero",
            value: Some(begin.to_string()),
        });
    }
    if end < begin {
        return Err(EngineError::InvalidConfig {
            field: "session.port_end",
            reason: "before_port_begin",
            value: Some(end.to_string()),
        });
    }

    for port in begin..=end {
        match TcpListener::bind(SocketAddr::new(host, port)).await {
            Ok(listener) => return Ok(listener),
            Err(err) => debug!(port, error = %err, "listen port unavailable"),
        }
    }

    Err(EngineError::PortUnavailable {
        host: host.to_string(),
        begin,
        end,
    })
}

async fn bind_dht(host: &str, port: u16) -> EngineResult<UdpSocket> {
    let ip = parse_host("dht.host", host)?;
    let addr = SocketAddr::new(ip, port);
    UdpSocket::bind(addr)
        .await
        .map_err(|source| EngineError::Bind {
            operation: "dht.bind",
            addr: addr.to_string(),
            source,
        })
}

fn local_addr(listener: &TcpListener, operation: &'static str) -> EngineResult<SocketAddr> {
    listener.local_addr().map_err(|source| EngineError::Bind {
        operation,
        addr: "listener".to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/srv/data"), PathBuf::from("/srv/data"));
        assert_eq!(expand_home("relative/db"), PathBuf::from("relative/db"));
        assert_eq!(expand_home("~other/db"), PathBuf::from("~other/db"));

        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(expand_home("~/.tidal/data"), Path::new(&home).join(".tidal/data"));
            assert_eq!(expand_home("~"), Path::new(&home).join(""));
        }
    }

    #[test]
    fn hosts_must_be_ip_addresses() {
        assert!(parse_host("session.host", "0.0.0.0").is_ok());
        assert!(parse_host("session.host", "::1").is_ok());
        let err = parse_host("session.host", "localhost").err();
        assert!(matches!(
            err,
            Some(EngineError::InvalidConfig {
                field: "session.host",
                reason: "not_an_ip_address",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn inverted_and_zero_ranges_are_rejected() {
        let host = IpAddr::from([127, 0, 0, 1]);
        assert!(matches!(
            bind_listener(host, 30_000, 20_000).await,
            Err(EngineError::InvalidConfig {
                reason: "before_port_begin",
                ..
            })
        ));
        assert!(matches!(
            bind_listener(host, 0, 10).await,
            Err(EngineError::InvalidConfig { reason: "zero", .. })
        ));
    }

    #[tokio::test]
    async fn worker_panic_is_reported_not_propagated() {
        let panicked: JoinHandle<()> = tokio::spawn(async { panic!("resume worker failed") });
        assert!(!join_worker(panicked).await);

        let finished = tokio::spawn(async {});
        assert!(join_worker(finished).await);
    }

    #[tokio::test]
    async fn scan_skips_occupied_port() -> Result<(), Box<dyn std::error::Error>> {
        let held = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = held.local_addr()?.port();
        let host = IpAddr::from([127, 0, 0, 1]);

        let err = bind_listener(host, port, port).await.err();
        assert!(matches!(
            err,
            Some(EngineError::PortUnavailable { begin, end, .. }) if begin == port && end == port
        ));
        drop(held);
        Ok(())
    }
}
