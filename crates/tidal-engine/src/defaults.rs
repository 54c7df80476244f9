//! Fixed parameter tables for the engine.
//!
//! # Design
//! - Values here are not user-editable; the translator copies them verbatim.
//! - User-facing fields also carry engine-side defaults so `EngineConfig::default()`
//!   describes a complete, startable session on its own.

use std::time::Duration;

/// Version string advertised to peers and trackers.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

const KIB: u64 = 1 << 10;
const MIB: u64 = 1 << 20;
const GIB: u64 = 1 << 30;

// Session
/// Upper bound on simultaneously open data files.
pub const MAX_OPEN_FILES: u64 = 10_240;
/// Peer exchange toggle.
pub const PEX_ENABLED: bool = true;
/// Peer id prefix used by this client.
pub const PRIVATE_PEER_ID_PREFIX: &str = concat!("-Tidal", env!("CARGO_PKG_VERSION"), "-");
/// Client version sent in the extension handshake.
pub const PRIVATE_EXTENSION_HANDSHAKE_CLIENT_VERSION: &str =
    concat!("Tidal ", env!("CARGO_PKG_VERSION"));
/// Largest accepted blocklist download.
pub const BLOCKLIST_MAX_RESPONSE_SIZE: u64 = 100 * MIB;
/// Timeout for fetching a torrent file over HTTP.
pub const TORRENT_ADD_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest accepted info dictionary fetched from peers.
pub const MAX_METADATA_SIZE: u64 = 30 * MIB;
/// Largest accepted torrent file.
pub const MAX_TORRENT_SIZE: u64 = 10 * MIB;
/// Largest accepted piece count.
pub const MAX_PIECES: u32 = 64 << 10;
/// Timeout for resolving tracker and peer host names.
pub const DNS_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);
/// Mode applied to created data directories and files.
pub const FILE_PERMISSIONS: u32 = 0o750;

// RPC server
/// RPC server toggle.
pub const RPC_ENABLED: bool = false;
/// RPC server bind address.
pub const RPC_HOST: &str = "127.0.0.1";
/// RPC server port.
pub const RPC_PORT: u16 = 7246;
/// Grace period for RPC shutdown.
pub const RPC_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

// Tracker
/// Peers requested per announce.
pub const TRACKER_NUM_WANT: i64 = 200;
/// Lower bound for tracker announce intervals.
pub const TRACKER_MIN_ANNOUNCE_INTERVAL: Duration = Duration::from_secs(60);
/// Timeout for HTTP tracker requests.
pub const TRACKER_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// User agent sent to HTTP trackers.
pub const TRACKER_HTTP_PRIVATE_USER_AGENT: &str = concat!("Tidal/", env!("CARGO_PKG_VERSION"));
/// Largest accepted HTTP tracker response.
pub const TRACKER_HTTP_MAX_RESPONSE_SIZE: u64 = 2 * MIB;
/// TLS verification for HTTPS trackers.
pub const TRACKER_HTTP_VERIFY_TLS: bool = true;

// DHT
/// Well-known nodes used to join the DHT.
pub const DHT_BOOTSTRAP_NODES: [&str; 5] = [
    "router.bittorrent.com:6881",
    "dht.transmissionbt.com:6881",
    "router.utorrent.com:6881",
    "dht.libtorrent.org:25401",
    "dht.aelitis.com:6881",
];

// Peer
/// Duplicate block requests allowed in endgame mode.
pub const ENDGAME_MAX_DUPLICATE_DOWNLOADS: i64 = 20;
/// Size of the allowed-fast piece set offered to peers.
pub const ALLOWED_FAST_SET: i64 = 10;

// IO
/// Block size of the read cache.
pub const READ_CACHE_BLOCK_SIZE: u64 = 128 * KIB;
/// Total read cache size.
pub const READ_CACHE_SIZE: u64 = 256 * MIB;
/// Time a cached block stays valid.
pub const READ_CACHE_TTL: Duration = Duration::from_secs(60);
/// Concurrent piece reads.
pub const PARALLEL_READS: u32 = 1;
/// Concurrent piece writes.
pub const PARALLEL_WRITES: u32 = 1;
/// Total write cache size.
pub const WRITE_CACHE_SIZE: u64 = GIB;

// Webseed
/// Dial timeout for web seeds.
pub const WEBSEED_DIAL_TIMEOUT: Duration = Duration::from_secs(10);
/// TLS handshake timeout for web seeds.
pub const WEBSEED_TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);
/// Response header timeout for web seeds.
pub const WEBSEED_RESPONSE_HEADER_TIMEOUT: Duration = Duration::from_secs(10);
/// Response body read timeout for web seeds.
pub const WEBSEED_RESPONSE_BODY_READ_TIMEOUT: Duration = Duration::from_secs(10);
/// Delay before retrying a failed web seed.
pub const WEBSEED_RETRY_INTERVAL: Duration = Duration::from_secs(60);
/// TLS verification for web seeds.
pub const WEBSEED_VERIFY_TLS: bool = true;
/// Web seed sources used per torrent.
pub const WEBSEED_MAX_SOURCES: u32 = 10;
/// Concurrent web seed downloads per torrent.
pub const WEBSEED_MAX_DOWNLOADS: u32 = 4;

/// DHT bootstrap nodes as owned strings.
#[must_use]
pub fn dht_bootstrap_nodes() -> Vec<String> {
    DHT_BOOTSTRAP_NODES.iter().map(ToString::to_string).collect()
}
