//! User-facing settings model and its persisted document form.
//!
//! # Design
//! - `Settings` is a flat record; every field maps one-to-one onto the engine parameter set.
//! - Missing keys fall back to the compiled-in default for that key, so older files stay readable.
//! - Durations persist as whole seconds and also read back from duration strings like `30s`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{self, SCHEMA_VERSION};

/// Settings the user may edit in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Path of the engine session database.
    pub database: String,
    /// Root directory for downloaded torrent data.
    pub data_dir: String,
    /// Whether each torrent gets its own sub-directory named after its id.
    #[serde(rename = "dataDirIncludesTorrentID")]
    pub data_dir_includes_torrent_id: bool,
    /// Address the peer listener binds to.
    pub host: String,
    /// First port of the peer listen range.
    pub port_begin: u16,
    /// Last port of the peer listen range.
    pub port_end: u16,
    /// How often resume data is written to the session database.
    #[serde(with = "crate::duration")]
    pub resume_write_interval: Duration,
    /// How often the blocklist is refreshed.
    #[serde(with = "crate::duration")]
    pub blocklist_update_interval: Duration,
    /// Timeout for a single blocklist refresh.
    #[serde(with = "crate::duration")]
    pub blocklist_update_timeout: Duration,
    /// Apply the blocklist to tracker addresses.
    pub blocklist_enabled_for_trackers: bool,
    /// Apply the blocklist to outgoing peer connections.
    pub blocklist_enabled_for_outgoing_connections: bool,
    /// Apply the blocklist to incoming peer connections.
    pub blocklist_enabled_for_incoming_connections: bool,
    /// Resume previously running torrents when the session starts.
    pub resume_on_startup: bool,
    /// Interval between torrent health checks.
    #[serde(with = "crate::duration")]
    pub health_check_interval: Duration,
    /// Time without progress before a torrent is considered unhealthy.
    #[serde(with = "crate::duration")]
    pub health_check_timeout: Duration,
    /// Time allowed for the final tracker announce on stop.
    #[serde(with = "crate::duration")]
    pub tracker_stop_timeout: Duration,
    /// Whether the DHT node runs.
    pub dht_enabled: bool,
    /// Address the DHT node binds to.
    pub dht_host: String,
    /// UDP port of the DHT node.
    pub dht_port: u16,
    /// Interval between DHT announces.
    #[serde(with = "crate::duration")]
    pub dht_announce_interval: Duration,
    /// Lower bound for DHT announce intervals.
    #[serde(with = "crate::duration")]
    pub dht_min_announce_interval: Duration,
    /// Number of regularly unchoked peers.
    pub unchoked_peers: i64,
    /// Number of optimistically unchoked peers.
    pub optimistic_unchoked_peers: i64,
    /// Maximum queued requests accepted from a peer.
    pub max_requests_in: i64,
    /// Maximum outstanding requests sent to a peer.
    pub max_requests_out: i64,
    /// Outstanding requests per peer before its rate is known.
    pub default_requests_out: i64,
    /// Timeout for a single block request.
    #[serde(with = "crate::duration")]
    pub request_timeout: Duration,
    /// Maximum concurrent outgoing peer dials.
    pub max_peer_dial: i64,
    /// Maximum accepted incoming peers.
    pub max_peer_accept: i64,
    /// Concurrent metadata downloads for magnet links.
    pub parallel_metadata_downloads: i64,
    /// Timeout for establishing a peer connection.
    #[serde(with = "crate::duration")]
    pub peer_connect_timeout: Duration,
    /// Timeout for the peer handshake.
    #[serde(with = "crate::duration")]
    pub peer_handshake_timeout: Duration,
    /// Timeout for reading a piece from disk for upload.
    #[serde(with = "crate::duration")]
    pub piece_read_timeout: Duration,
    /// Maximum known peer addresses kept per torrent.
    pub max_peer_addresses: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: defaults::DATABASE.to_string(),
            data_dir: defaults::DATA_DIR.to_string(),
            data_dir_includes_torrent_id: defaults::DATA_DIR_INCLUDES_TORRENT_ID,
            host: defaults::HOST.to_string(),
            port_begin: defaults::PORT_BEGIN,
            port_end: defaults::PORT_END,
            resume_write_interval: defaults::RESUME_WRITE_INTERVAL,
            blocklist_update_interval: defaults::BLOCKLIST_UPDATE_INTERVAL,
            blocklist_update_timeout: defaults::BLOCKLIST_UPDATE_TIMEOUT,
            blocklist_enabled_for_trackers: defaults::BLOCKLIST_ENABLED_FOR_TRACKERS,
            blocklist_enabled_for_outgoing_connections: defaults::BLOCKLIST_ENABLED_FOR_OUTGOING,
            blocklist_enabled_for_incoming_connections: defaults::BLOCKLIST_ENABLED_FOR_INCOMING,
            resume_on_startup: defaults::RESUME_ON_STARTUP,
            health_check_interval: defaults::HEALTH_CHECK_INTERVAL,
            health_check_timeout: defaults::HEALTH_CHECK_TIMEOUT,
            tracker_stop_timeout: defaults::TRACKER_STOP_TIMEOUT,
            dht_enabled: defaults::DHT_ENABLED,
            dht_host: defaults::DHT_HOST.to_string(),
            dht_port: defaults::DHT_PORT,
            dht_announce_interval: defaults::DHT_ANNOUNCE_INTERVAL,
            dht_min_announce_interval: defaults::DHT_MIN_ANNOUNCE_INTERVAL,
            unchoked_peers: defaults::UNCHOKED_PEERS,
            optimistic_unchoked_peers: defaults::OPTIMISTIC_UNCHOKED_PEERS,
            max_requests_in: defaults::MAX_REQUESTS_IN,
            max_requests_out: defaults::MAX_REQUESTS_OUT,
            default_requests_out: defaults::DEFAULT_REQUESTS_OUT,
            request_timeout: defaults::REQUEST_TIMEOUT,
            max_peer_dial: defaults::MAX_PEER_DIAL,
            max_peer_accept: defaults::MAX_PEER_ACCEPT,
            parallel_metadata_downloads: defaults::PARALLEL_METADATA_DOWNLOADS,
            peer_connect_timeout: defaults::PEER_CONNECT_TIMEOUT,
            peer_handshake_timeout: defaults::PEER_HANDSHAKE_TIMEOUT,
            piece_read_timeout: defaults::PIECE_READ_TIMEOUT,
            max_peer_addresses: defaults::MAX_PEER_ADDRESSES,
        }
    }
}

/// On-disk shape of the config file: a schema version beside the flat settings keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDocument {
    /// Schema version of the file; absent in files written before versioning.
    pub version: u32,
    /// The settings themselves, stored at the top level of the document.
    #[serde(flatten)]
    pub settings: Settings,
}

#[derive(Deserialize)]
struct VersionField {
    #[serde(default = "legacy_version")]
    version: u32,
}

impl SettingsDocument {
    /// Wrap settings in a document stamped with the current schema version.
    #[must_use]
    pub const fn current(settings: Settings) -> Self {
        Self {
            version: SCHEMA_VERSION,
            settings,
        }
    }

    /// Parse a document from YAML text.
    ///
    /// The settings and the version are read in separate passes so errors keep the
    /// line and column of the offending key.
    ///
    /// # Errors
    ///
    /// Returns the YAML error when either the settings or the version cannot be read.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        let settings: Settings = serde_yaml::from_str(contents)?;
        let VersionField { version } = serde_yaml::from_str(contents)?;
        Ok(Self { version, settings })
    }
}

const fn legacy_version() -> u32 {
    1
}
