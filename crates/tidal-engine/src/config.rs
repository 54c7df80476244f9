//! Full parameter set required to start an engine session.
//!
//! # Design
//! - Grouped into sections mirroring the engine's subsystems.
//! - Plain data: no validation or clamping happens here. The engine decides what it accepts.
//! - `Serialize` gives callers a byte-stable rendering for comparisons and diagnostics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Everything an engine session needs at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    /// Storage, listener, blocklist, and lifecycle options.
    pub session: SessionOptions,
    /// Remote-control server options.
    pub rpc: RpcOptions,
    /// Tracker client options.
    pub tracker: TrackerOptions,
    /// DHT node options.
    pub dht: DhtOptions,
    /// Peer connection and request pipelining options.
    pub peer: PeerOptions,
    /// Disk cache options.
    pub io: IoOptions,
    /// Web seed (HTTP source) options.
    pub webseed: WebseedOptions,
}

/// Session-wide options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Path of the session database.
    pub database: String,
    /// Root directory for torrent data.
    pub data_dir: String,
    /// Whether each torrent's data lives in a sub-directory named after its id.
    pub data_dir_includes_torrent_id: bool,
    /// Peer listener bind address.
    pub host: String,
    /// First port tried for the peer listener.
    pub port_begin: u16,
    /// Last port tried for the peer listener.
    pub port_end: u16,
    /// Upper bound on simultaneously open data files.
    pub max_open_files: u64,
    /// Peer exchange toggle.
    pub pex_enabled: bool,
    /// Interval between resume data writes.
    pub resume_write_interval: Duration,
    /// Peer id prefix.
    pub private_peer_id_prefix: String,
    /// Client version advertised in the extension handshake.
    pub private_extension_handshake_client_version: String,
    /// Interval between blocklist refreshes.
    pub blocklist_update_interval: Duration,
    /// Timeout for a blocklist refresh.
    pub blocklist_update_timeout: Duration,
    /// Apply the blocklist to trackers.
    pub blocklist_enabled_for_trackers: bool,
    /// Apply the blocklist to outgoing connections.
    pub blocklist_enabled_for_outgoing_connections: bool,
    /// Apply the blocklist to incoming connections.
    pub blocklist_enabled_for_incoming_connections: bool,
    /// Largest accepted blocklist download in bytes.
    pub blocklist_max_response_size: u64,
    /// Timeout for fetching torrent files over HTTP.
    pub torrent_add_http_timeout: Duration,
    /// Largest accepted metadata in bytes.
    pub max_metadata_size: u64,
    /// Largest accepted torrent file in bytes.
    pub max_torrent_size: u64,
    /// Largest accepted piece count.
    pub max_pieces: u32,
    /// Timeout for DNS lookups.
    pub dns_resolve_timeout: Duration,
    /// Resume previously running torrents at startup.
    pub resume_on_startup: bool,
    /// Interval between torrent health checks.
    pub health_check_interval: Duration,
    /// Time without progress before a torrent is unhealthy.
    pub health_check_timeout: Duration,
    /// Unix mode for created directories.
    pub file_permissions: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            database: "~/.tidal/session.db".to_string(),
            data_dir: "~/.tidal/data".to_string(),
            data_dir_includes_torrent_id: false,
            host: "0.0.0.0".to_string(),
            port_begin: 20_000,
            port_end: 30_000,
            max_open_files: defaults::MAX_OPEN_FILES,
            pex_enabled: defaults::PEX_ENABLED,
            resume_write_interval: Duration::from_secs(30),
            private_peer_id_prefix: defaults::PRIVATE_PEER_ID_PREFIX.to_string(),
            private_extension_handshake_client_version:
                defaults::PRIVATE_EXTENSION_HANDSHAKE_CLIENT_VERSION.to_string(),
            blocklist_update_interval: Duration::from_secs(24 * 60 * 60),
            blocklist_update_timeout: Duration::from_secs(10 * 60),
            blocklist_enabled_for_trackers: true,
            blocklist_enabled_for_outgoing_connections: true,
            blocklist_enabled_for_incoming_connections: true,
            blocklist_max_response_size: defaults::BLOCKLIST_MAX_RESPONSE_SIZE,
            torrent_add_http_timeout: defaults::TORRENT_ADD_HTTP_TIMEOUT,
            max_metadata_size: defaults::MAX_METADATA_SIZE,
            max_torrent_size: defaults::MAX_TORRENT_SIZE,
            max_pieces: defaults::MAX_PIECES,
            dns_resolve_timeout: defaults::DNS_RESOLVE_TIMEOUT,
            resume_on_startup: true,
            health_check_interval: Duration::from_secs(10),
            health_check_timeout: Duration::from_secs(60),
            file_permissions: defaults::FILE_PERMISSIONS,
        }
    }
}

/// Remote-control server options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcOptions {
    /// Whether the RPC server runs.
    pub enabled: bool,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Grace period on shutdown.
    pub shutdown_timeout: Duration,
}

impl Default for RpcOptions {
    fn default() -> Self {
        Self {
            enabled: defaults::RPC_ENABLED,
            host: defaults::RPC_HOST.to_string(),
            port: defaults::RPC_PORT,
            shutdown_timeout: defaults::RPC_SHUTDOWN_TIMEOUT,
        }
    }
}

/// Tracker client options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerOptions {
    /// Peers requested per announce.
    pub num_want: i64,
    /// Time allowed for the stop announce.
    pub stop_timeout: Duration,
    /// Lower bound for announce intervals.
    pub min_announce_interval: Duration,
    /// HTTP request timeout.
    pub http_timeout: Duration,
    /// User agent for HTTP trackers.
    pub http_private_user_agent: String,
    /// Largest accepted HTTP response in bytes.
    pub http_max_response_size: u64,
    /// TLS verification toggle.
    pub http_verify_tls: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            num_want: defaults::TRACKER_NUM_WANT,
            stop_timeout: Duration::from_secs(5),
            min_announce_interval: defaults::TRACKER_MIN_ANNOUNCE_INTERVAL,
            http_timeout: defaults::TRACKER_HTTP_TIMEOUT,
            http_private_user_agent: defaults::TRACKER_HTTP_PRIVATE_USER_AGENT.to_string(),
            http_max_response_size: defaults::TRACKER_HTTP_MAX_RESPONSE_SIZE,
            http_verify_tls: defaults::TRACKER_HTTP_VERIFY_TLS,
        }
    }
}

/// DHT node options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhtOptions {
    /// Whether the DHT node runs.
    pub enabled: bool,
    /// Bind address.
    pub host: String,
    /// UDP port.
    pub port: u16,
    /// Interval between announces.
    pub announce_interval: Duration,
    /// Lower bound for announce intervals.
    pub min_announce_interval: Duration,
    /// Nodes contacted to join the network.
    pub bootstrap_nodes: Vec<String>,
}

impl Default for DhtOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 7246,
            announce_interval: Duration::from_secs(30 * 60),
            min_announce_interval: Duration::from_secs(60),
            bootstrap_nodes: defaults::dht_bootstrap_nodes(),
        }
    }
}

/// Peer connection options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerOptions {
    /// Regularly unchoked peers.
    pub unchoked_peers: i64,
    /// Optimistically unchoked peers.
    pub optimistic_unchoked_peers: i64,
    /// Queued requests accepted from a peer.
    pub max_requests_in: i64,
    /// Outstanding requests sent to a peer.
    pub max_requests_out: i64,
    /// Outstanding requests before a peer's rate is known.
    pub default_requests_out: i64,
    /// Block request timeout.
    pub request_timeout: Duration,
    /// Duplicate requests allowed in endgame mode.
    pub endgame_max_duplicate_downloads: i64,
    /// Concurrent outgoing dials.
    pub max_peer_dial: i64,
    /// Accepted incoming peers.
    pub max_peer_accept: i64,
    /// Concurrent metadata downloads.
    pub parallel_metadata_downloads: i64,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Handshake timeout.
    pub handshake_timeout: Duration,
    /// Disk read timeout when serving pieces.
    pub piece_read_timeout: Duration,
    /// Known addresses kept per torrent.
    pub max_peer_addresses: i64,
    /// Allowed-fast set size.
    pub allowed_fast_set: i64,
}

impl Default for PeerOptions {
    fn default() -> Self {
        Self {
            unchoked_peers: 3,
            optimistic_unchoked_peers: 1,
            max_requests_in: 250,
            max_requests_out: 250,
            default_requests_out: 50,
            request_timeout: Duration::from_secs(20),
            endgame_max_duplicate_downloads: defaults::ENDGAME_MAX_DUPLICATE_DOWNLOADS,
            max_peer_dial: 80,
            max_peer_accept: 20,
            parallel_metadata_downloads: 2,
            connect_timeout: Duration::from_secs(5),
            handshake_timeout: Duration::from_secs(10),
            piece_read_timeout: Duration::from_secs(30),
            max_peer_addresses: 2000,
            allowed_fast_set: defaults::ALLOWED_FAST_SET,
        }
    }
}

/// Disk cache options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoOptions {
    /// Read cache block size in bytes.
    pub read_cache_block_size: u64,
    /// Read cache size in bytes.
    pub read_cache_size: u64,
    /// Read cache entry lifetime.
    pub read_cache_ttl: Duration,
    /// Concurrent reads.
    pub parallel_reads: u32,
    /// Concurrent writes.
    pub parallel_writes: u32,
    /// Write cache size in bytes.
    pub write_cache_size: u64,
}

impl Default for IoOptions {
    fn default() -> Self {
        Self {
            read_cache_block_size: defaults::READ_CACHE_BLOCK_SIZE,
            read_cache_size: defaults::READ_CACHE_SIZE,
            read_cache_ttl: defaults::READ_CACHE_TTL,
            parallel_reads: defaults::PARALLEL_READS,
            parallel_writes: defaults::PARALLEL_WRITES,
            write_cache_size: defaults::WRITE_CACHE_SIZE,
        }
    }
}

/// Web seed options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebseedOptions {
    /// Dial timeout.
    pub dial_timeout: Duration,
    /// TLS handshake timeout.
    pub tls_handshake_timeout: Duration,
    /// Response header timeout.
    pub response_header_timeout: Duration,
    /// Response body read timeout.
    pub response_body_read_timeout: Duration,
    /// Retry delay after a failure.
    pub retry_interval: Duration,
    /// TLS verification toggle.
    pub verify_tls: bool,
    /// Sources used per torrent.
    pub max_sources: u32,
    /// Concurrent downloads per torrent.
    pub max_downloads: u32,
}

impl Default for WebseedOptions {
    fn default() -> Self {
        Self {
            dial_timeout: defaults::WEBSEED_DIAL_TIMEOUT,
            tls_handshake_timeout: defaults::WEBSEED_TLS_HANDSHAKE_TIMEOUT,
            response_header_timeout: defaults::WEBSEED_RESPONSE_HEADER_TIMEOUT,
            response_body_read_timeout: defaults::WEBSEED_RESPONSE_BODY_READ_TIMEOUT,
            retry_interval: defaults::WEBSEED_RETRY_INTERVAL,
            verify_tls: defaults::WEBSEED_VERIFY_TLS,
            max_sources: defaults::WEBSEED_MAX_SOURCES,
            max_downloads: defaults::WEBSEED_MAX_DOWNLOADS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_tables_feed_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.session.max_open_files, 10_240);
        assert_eq!(config.session.blocklist_max_response_size, 100 << 20);
        assert_eq!(config.session.max_pieces, 65_536);
        assert!(config.session.private_peer_id_prefix.starts_with("-Tidal"));
        assert!(!config.rpc.enabled);
        assert_eq!(config.rpc.port, 7246);
        assert_eq!(config.tracker.num_want, 200);
        assert_eq!(config.dht.bootstrap_nodes.len(), 5);
        assert_eq!(config.dht.bootstrap_nodes[3], "dht.libtorrent.org:25401");
        assert_eq!(config.peer.allowed_fast_set, 10);
        assert_eq!(config.io.write_cache_size, 1 << 30);
        assert_eq!(config.webseed.max_downloads, 4);
    }

    #[test]
    fn serialization_is_stable() -> Result<(), serde_json::Error> {
        let first = serde_json::to_vec(&EngineConfig::default())?;
        let second = serde_json::to_vec(&EngineConfig::default())?;
        assert_eq!(first, second);
        Ok(())
    }
}
