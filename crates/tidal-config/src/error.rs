//! Error types for configuration operations.
//!
//! # Design
//! - One tagged enum; callers branch on [`ConfigErrorKind`] instead of inspecting types.
//! - Messages stay constant; the path and source carry the detail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be opened.
    #[error("failed to open config file")]
    Open {
        /// Path of the config file.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The config file could not be created or written.
    #[error("failed to save config file")]
    Save {
        /// Path of the config file.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The config file was opened but reading it failed.
    #[error("failed to read config file")]
    Read {
        /// Path of the config file.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The config file contents are not a valid settings document.
    #[error("failed to parse config file")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Source YAML error.
        source: serde_yaml::Error,
    },
    /// Settings could not be rendered as YAML.
    #[error("failed to serialize settings")]
    Serialize {
        /// Source YAML error.
        source: serde_yaml::Error,
    },
}

/// Coarse classification used to pick user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// The file could not be opened for a reason other than absence.
    Open,
    /// The file could not be written.
    Save,
    /// Any other failure (read, parse, serialize).
    Other,
}

impl ConfigError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::Open { .. } => ConfigErrorKind::Open,
            Self::Save { .. } => ConfigErrorKind::Save,
            Self::Read { .. } | Self::Parse { .. } | Self::Serialize { .. } => {
                ConfigErrorKind::Other
            }
        }
    }

    /// Path involved in the failure, when the operation touched a file.
    #[must_use]
    pub const fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Open { path, .. }
            | Self::Save { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. } => Some(path),
            Self::Serialize { .. } => None,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn yaml_error() -> serde_yaml::Error {
        match serde_yaml::from_str::<u16>("not-a-port") {
            Ok(_) => <serde_yaml::Error as serde::de::Error>::custom("expected invalid yaml"),
            Err(err) => err,
        }
    }

    #[test]
    fn kinds_follow_variants() {
        let path = PathBuf::from("config.yaml");
        let cases = vec![
            (
                ConfigError::Open {
                    path: path.clone(),
                    source: io::Error::other("denied"),
                },
                ConfigErrorKind::Open,
            ),
            (
                ConfigError::Save {
                    path: path.clone(),
                    source: io::Error::other("read-only"),
                },
                ConfigErrorKind::Save,
            ),
            (
                ConfigError::Read {
                    path: path.clone(),
                    source: io::Error::other("eio"),
                },
                ConfigErrorKind::Other,
            ),
            (
                ConfigError::Parse {
                    path,
                    source: yaml_error(),
                },
                ConfigErrorKind::Other,
            ),
            (
                ConfigError::Serialize {
                    source: yaml_error(),
                },
                ConfigErrorKind::Other,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind);
            assert!(err.source().is_some());
        }
    }

    #[test]
    fn path_is_exposed_for_file_operations() {
        let err = ConfigError::Open {
            path: PathBuf::from("/etc/tidal.yaml"),
            source: io::Error::other("denied"),
        };
        assert_eq!(err.path(), Some(&PathBuf::from("/etc/tidal.yaml")));
        assert_eq!(err.to_string(), "failed to open config file");

        let err = ConfigError::Serialize {
            source: yaml_error(),
        };
        assert!(err.path().is_none());
    }
}
