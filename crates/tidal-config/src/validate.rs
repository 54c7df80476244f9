//! Sanity checks for loaded settings.
//!
//! Checks never rewrite values: the engine receives exactly what the user wrote and
//! owns the final decision. Warnings exist so suspicious files are visible in logs.

use std::fmt;
use std::time::Duration;

use crate::model::Settings;

/// A suspicious setting detected during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    /// Config key the warning refers to.
    pub field: &'static str,
    /// Machine-readable reason.
    pub reason: &'static str,
}

impl fmt::Display for SettingsWarning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.reason)
    }
}

/// Inspect settings and report values the engine is likely to reject or misuse.
#[must_use]
pub fn validate_settings(settings: &Settings) -> Vec<SettingsWarning> {
    let mut warnings = Vec::new();
    let mut warn = |field: &'static str, reason: &'static str| {
        warnings.push(SettingsWarning { field, reason });
    };

    if settings.port_begin == 0 {
        warn("portBegin", "zero");
    }
    if settings.port_begin > settings.port_end {
        warn("portEnd", "before_port_begin");
    }
    if settings.database.trim().is_empty() {
        warn("database", "empty");
    }
    if settings.data_dir.trim().is_empty() {
        warn("dataDir", "empty");
    }
    if settings.host.trim().is_empty() {
        warn("host", "empty");
    }
    if settings.dht_enabled && settings.dht_host.trim().is_empty() {
        warn("dhtHost", "empty");
    }
    if settings.health_check_timeout < settings.health_check_interval {
        warn("healthCheckTimeout", "shorter_than_interval");
    }
    if settings.dht_announce_interval < settings.dht_min_announce_interval {
        warn("dhtAnnounceInterval", "below_minimum");
    }

    let durations: [(&'static str, Duration); 12] = [
        ("resumeWriteInterval", settings.resume_write_interval),
        ("blocklistUpdateInterval", settings.blocklist_update_interval),
        ("blocklistUpdateTimeout", settings.blocklist_update_timeout),
        ("healthCheckInterval", settings.health_check_interval),
        ("healthCheckTimeout", settings.health_check_timeout),
        ("trackerStopTimeout", settings.tracker_stop_timeout),
        ("dhtAnnounceInterval", settings.dht_announce_interval),
        ("dhtMinAnnounceInterval", settings.dht_min_announce_interval),
        ("requestTimeout", settings.request_timeout),
        ("peerConnectTimeout", settings.peer_connect_timeout),
        ("peerHandshakeTimeout", settings.peer_handshake_timeout),
        ("pieceReadTimeout", settings.piece_read_timeout),
    ];
    for (field, value) in durations {
        if value.is_zero() {
            warn(field, "zero");
        }
    }

    let limits: [(&'static str, i64); 9] = [
        ("unchokedPeers", settings.unchoked_peers),
        ("optimisticUnchokedPeers", settings.optimistic_unchoked_peers),
        ("maxRequestsIn", settings.max_requests_in),
        ("maxRequestsOut", settings.max_requests_out),
        ("defaultRequestsOut", settings.default_requests_out),
        ("maxPeerDial", settings.max_peer_dial),
        ("maxPeerAccept", settings.max_peer_accept),
        ("parallelMetadataDownloads", settings.parallel_metadata_downloads),
        ("maxPeerAddresses", settings.max_peer_addresses),
    ];
    for (field, value) in limits {
        if value <= 0 {
            warn(field, "not_positive");
        }
    }

    if settings.default_requests_out > settings.max_requests_out {
        warn("defaultRequestsOut", "above_max_requests_out");
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_clean() {
        assert!(validate_settings(&Settings::default()).is_empty());
    }

    #[test]
    fn inverted_port_range_is_reported() {
        let settings = Settings {
            port_begin: 6000,
            port_end: 5000,
            ..Settings::default()
        };
        let warnings = validate_settings(&settings);
        assert_eq!(
            warnings,
            vec![SettingsWarning {
                field: "portEnd",
                reason: "before_port_begin",
            }]
        );
    }

    #[test]
    fn zero_durations_and_limits_are_reported() {
        let settings = Settings {
            dht_min_announce_interval: Duration::ZERO,
            max_peer_dial: 0,
            ..Settings::default()
        };
        let warnings = validate_settings(&settings);
        let rendered: Vec<String> = warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "dhtMinAnnounceInterval: zero".to_string(),
                "maxPeerDial: not_positive".to_string(),
            ]
        );
    }

    #[test]
    fn empty_paths_are_reported() {
        let settings = Settings {
            database: "  ".to_string(),
            data_dir: String::new(),
            ..Settings::default()
        };
        let fields: Vec<&str> = validate_settings(&settings)
            .into_iter()
            .map(|warning| warning.field)
            .collect();
        assert_eq!(fields, vec!["database", "dataDir"]);
    }
}
