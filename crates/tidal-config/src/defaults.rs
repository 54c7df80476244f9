//! Compiled-in defaults for the user-facing settings.
//!
//! # Design
//! - Every `Settings` field has exactly one named default here.
//! - Durations are expressed in seconds to match the persisted form.

use std::time::Duration;

/// Environment variable naming the config file path.
pub const CONFIG_PATH_ENV: &str = "TIDAL_CONFIG";
/// Config file used when no path is supplied.
pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
/// Schema version written to new config files.
pub const SCHEMA_VERSION: u32 = 1;

pub(crate) const DATABASE: &str = "~/.tidal/session.db";
pub(crate) const DATA_DIR: &str = "~/.tidal/data";
pub(crate) const DATA_DIR_INCLUDES_TORRENT_ID: bool = false;
pub(crate) const HOST: &str = "0.0.0.0";
pub(crate) const PORT_BEGIN: u16 = 20_000;
pub(crate) const PORT_END: u16 = 30_000;
pub(crate) const RESUME_WRITE_INTERVAL: Duration = Duration::from_secs(30);
pub(crate) const BLOCKLIST_UPDATE_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
pub(crate) const BLOCKLIST_UPDATE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub(crate) const BLOCKLIST_ENABLED_FOR_TRACKERS: bool = true;
pub(crate) const BLOCKLIST_ENABLED_FOR_OUTGOING: bool = true;
pub(crate) const BLOCKLIST_ENABLED_FOR_INCOMING: bool = true;
pub(crate) const RESUME_ON_STARTUP: bool = true;
pub(crate) const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(10);
pub(crate) const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(60);
pub(crate) const TRACKER_STOP_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DHT_ENABLED: bool = true;
pub(crate) const DHT_HOST: &str = "0.0.0.0";
pub(crate) const DHT_PORT: u16 = 7246;
pub(crate) const DHT_ANNOUNCE_INTERVAL: Duration = Duration::from_secs(30 * 60);
pub(crate) const DHT_MIN_ANNOUNCE_INTERVAL: Duration = Duration::from_secs(60);
pub(crate) const UNCHOKED_PEERS: i64 = 3;
pub(crate) const OPTIMISTIC_UNCHOKED_PEERS: i64 = 1;
pub(crate) const MAX_REQUESTS_IN: i64 = 250;
pub(crate) const MAX_REQUESTS_OUT: i64 = 250;
pub(crate) const DEFAULT_REQUESTS_OUT: i64 = 50;
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
pub(crate) const MAX_PEER_DIAL: i64 = 80;
pub(crate) const MAX_PEER_ACCEPT: i64 = 20;
pub(crate) const PARALLEL_METADATA_DOWNLOADS: i64 = 2;
pub(crate) const PEER_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const PEER_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const PIECE_READ_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const MAX_PEER_ADDRESSES: i64 = 2000;
