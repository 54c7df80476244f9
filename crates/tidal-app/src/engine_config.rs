//! Settings to engine configuration translation.
//!
//! # Design
//! - Pure and total: every user-facing setting is copied verbatim, nothing is clamped.
//! - Parameters the user cannot edit come from the engine's fixed tables.
//! - Range checks belong to the engine; settings warnings are emitted by the config store.

use tidal_config::Settings;
use tidal_engine::{
    DhtOptions, EngineConfig, IoOptions, PeerOptions, RpcOptions, SessionOptions,
    TrackerOptions, WebseedOptions, defaults,
};

/// Build the full engine parameter set from user settings.
#[must_use]
pub fn engine_config_from_settings(settings: &Settings) -> EngineConfig {
    EngineConfig {
        session: SessionOptions {
            database: settings.database.clone(),
            data_dir: settings.data_dir.clone(),
            data_dir_includes_torrent_id: settings.data_dir_includes_torrent_id,
            host: settings.host.clone(),
            port_begin: settings.port_begin,
            port_end: settings.port_end,
            resume_write_interval: settings.resume_write_interval,
            blocklist_update_interval: settings.blocklist_update_interval,
            blocklist_update_timeout: settings.blocklist_update_timeout,
            blocklist_enabled_for_trackers: settings.blocklist_enabled_for_trackers,
            blocklist_enabled_for_outgoing_connections: settings
                .blocklist_enabled_for_outgoing_connections,
            blocklist_enabled_for_incoming_connections: settings
                .blocklist_enabled_for_incoming_connections,
            resume_on_startup: settings.resume_on_startup,
            health_check_interval: settings.health_check_interval,
            health_check_timeout: settings.health_check_timeout,
            max_open_files: defaults::MAX_OPEN_FILES,
            pex_enabled: defaults::PEX_ENABLED,
            private_peer_id_prefix: defaults::PRIVATE_PEER_ID_PREFIX.to_string(),
            private_extension_handshake_client_version:
                defaults::PRIVATE_EXTENSION_HANDSHAKE_CLIENT_VERSION.to_string(),
            blocklist_max_response_size: defaults::BLOCKLIST_MAX_RESPONSE_SIZE,
            torrent_add_http_timeout: defaults::TORRENT_ADD_HTTP_TIMEOUT,
            max_metadata_size: defaults::MAX_METADATA_SIZE,
            max_torrent_size: defaults::MAX_TORRENT_SIZE,
            max_pieces: defaults::MAX_PIECES,
            dns_resolve_timeout: defaults::DNS_RESOLVE_TIMEOUT,
            file_permissions: defaults::FILE_PERMISSIONS,
        },
        tracker: TrackerOptions {
            stop_timeout: settings.tracker_stop_timeout,
            ..TrackerOptions::default()
        },
        dht: DhtOptions {
            enabled: settings.dht_enabled,
            host: settings.dht_host.clone(),
            port: settings.dht_port,
            announce_interval: settings.dht_announce_interval,
            min_announce_interval: settings.dht_min_announce_interval,
            bootstrap_nodes: defaults::dht_bootstrap_nodes(),
        },
        peer: PeerOptions {
            unchoked_peers: settings.unchoked_peers,
            optimistic_unchoked_peers: settings.optimistic_unchoked_peers,
            max_requests_in: settings.max_requests_in,
            max_requests_out: settings.max_requests_out,
            default_requests_out: settings.default_requests_out,
            request_timeout: settings.request_timeout,
            max_peer_dial: settings.max_peer_dial,
            max_peer_accept: settings.max_peer_accept,
            parallel_metadata_downloads: settings.parallel_metadata_downloads,
            connect_timeout: settings.peer_connect_timeout,
            handshake_timeout: settings.peer_handshake_timeout,
            piece_read_timeout: settings.piece_read_timeout,
            max_peer_addresses: settings.max_peer_addresses,
            endgame_max_duplicate_downloads: defaults::ENDGAME_MAX_DUPLICATE_DOWNLOADS,
            allowed_fast_set: defaults::ALLOWED_FAST_SET,
        },
        rpc: RpcOptions::default(),
        io: IoOptions::default(),
        webseed: WebseedOptions::default(),
    }
}
