use std::net::{TcpListener, UdpSocket};
use std::path::Path;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tempfile::TempDir;
use tidal_engine::{EngineConfig, EngineError, LocalEngine, TorrentEngine};

fn free_tcp_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

fn config_in(dir: &Path, port: u16) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.session.database = dir.join("db").join("session.db").display().to_string();
    config.session.data_dir = dir.join("data").display().to_string();
    config.session.host = "127.0.0.1".to_string();
    config.session.port_begin = port;
    config.session.port_end = port;
    config.dht.host = "127.0.0.1".to_string();
    config.dht.port = 0;
    config
}

fn read_database(dir: &Path) -> Result<Value> {
    let bytes = std::fs::read(dir.join("db").join("session.db"))?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn session_binds_and_shuts_down_cleanly() -> Result<()> {
    let dir = TempDir::new()?;
    let port = free_tcp_port()?;
    let engine = LocalEngine::new();
    assert_eq!(engine.name(), "local");

    let mut session = engine.start(config_in(dir.path(), port)).await?;
    assert_eq!(session.listen_addr().port(), port);
    let dht = session.dht_addr().ok_or_else(|| anyhow!("dht should be bound"))?;
    assert_ne!(dht.port(), 0);
    assert_eq!(session.config().session.port_begin, port);
    assert!(dir.path().join("data").is_dir());

    session.flush().await?;
    session.shutdown().await?;
    session.shutdown().await?;

    let database = read_database(dir.path())?;
    assert_eq!(database["start_count"], 1);
    assert!(database["last_flushed_at"].is_string());

    // The port is released once the session is down.
    TcpListener::bind(("127.0.0.1", port))?;
    Ok(())
}

#[tokio::test]
async fn flush_after_shutdown_reports_closed_session() -> Result<()> {
    let dir = TempDir::new()?;
    let mut session = LocalEngine::new()
        .start(config_in(dir.path(), free_tcp_port()?))
        .await?;
    session.shutdown().await?;

    let err = session.flush().await.err();
    assert!(matches!(
        err,
        Some(EngineError::SessionClosed { operation: "flush" })
    ));
    Ok(())
}

#[tokio::test]
async fn restart_reuses_session_database() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = LocalEngine::new();

    let mut first = engine.start(config_in(dir.path(), free_tcp_port()?)).await?;
    first.shutdown().await?;
    let session_id = read_database(dir.path())?["session_id"].clone();

    let mut second = engine.start(config_in(dir.path(), free_tcp_port()?)).await?;
    second.shutdown().await?;

    let database = read_database(dir.path())?;
    assert_eq!(database["session_id"], session_id);
    assert_eq!(database["start_count"], 2);
    Ok(())
}

#[tokio::test]
async fn occupied_port_range_fails_startup() -> Result<()> {
    let dir = TempDir::new()?;
    let held = TcpListener::bind("127.0.0.1:0")?;
    let port = held.local_addr()?.port();

    let result = LocalEngine::new().start(config_in(dir.path(), port)).await;
    assert!(matches!(
        result.err(),
        Some(EngineError::PortUnavailable { begin, end, .. }) if begin == port && end == port
    ));
    drop(held);
    Ok(())
}

#[tokio::test]
async fn dht_port_conflict_fails_startup() -> Result<()> {
    let dir = TempDir::new()?;
    let held = UdpSocket::bind("127.0.0.1:0")?;
    let mut config = config_in(dir.path(), free_tcp_port()?);
    config.dht.port = held.local_addr()?.port();

    let result = LocalEngine::new().start(config).await;
    assert!(matches!(
        result.err(),
        Some(EngineError::Bind {
            operation: "dht.bind",
            ..
        })
    ));
    drop(held);
    Ok(())
}

#[tokio::test]
async fn failed_binds_are_not_counted_as_starts() -> Result<()> {
    let dir = TempDir::new()?;
    let held_tcp = TcpListener::bind("127.0.0.1:0")?;
    let held_udp = UdpSocket::bind("127.0.0.1:0")?;
    let engine = LocalEngine::new();

    let occupied = config_in(dir.path(), held_tcp.local_addr()?.port());
    assert!(engine.start(occupied).await.is_err());
    let mut dht_conflict = config_in(dir.path(), free_tcp_port()?);
    dht_conflict.dht.port = held_udp.local_addr()?.port();
    assert!(engine.start(dht_conflict).await.is_err());
    assert!(!dir.path().join("db").join("session.db").exists());

    let mut session = engine.start(config_in(dir.path(), free_tcp_port()?)).await?;
    session.shutdown().await?;
    assert_eq!(read_database(dir.path())?["start_count"], 1);
    drop((held_tcp, held_udp));
    Ok(())
}

#[tokio::test]
async fn disabled_dht_binds_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = config_in(dir.path(), free_tcp_port()?);
    config.dht.enabled = false;

    let mut session = LocalEngine::new().start(config).await?;
    assert!(session.dht_addr().is_none());
    session.shutdown().await?;
    Ok(())
}

#[tokio::test]
async fn corrupt_database_fails_startup() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::create_dir_all(dir.path().join("db"))?;
    std::fs::write(dir.path().join("db").join("session.db"), "not json")?;

    let result = LocalEngine::new()
        .start(config_in(dir.path(), free_tcp_port()?))
        .await;
    assert!(matches!(result.err(), Some(EngineError::Database { .. })));
    Ok(())
}

#[tokio::test]
async fn unusable_parameters_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;

    let mut hostname = config_in(dir.path(), free_tcp_port()?);
    hostname.session.host = "localhost".to_string();
    assert!(matches!(
        LocalEngine::new().start(hostname).await.err(),
        Some(EngineError::InvalidConfig {
            field: "session.host",
            ..
        })
    ));

    let mut zero_interval = config_in(dir.path(), free_tcp_port()?);
    zero_interval.session.resume_write_interval = std::time::Duration::ZERO;
    assert!(matches!(
        LocalEngine::new().start(zero_interval).await.err(),
        Some(EngineError::InvalidConfig {
            field: "session.resume_write_interval",
            ..
        })
    ));

    let mut inverted = config_in(dir.path(), 30_000);
    inverted.session.port_end = 20_000;
    assert!(matches!(
        LocalEngine::new().start(inverted).await.err(),
        Some(EngineError::InvalidConfig {
            reason: "before_port_begin",
            ..
        })
    ));
    Ok(())
}
