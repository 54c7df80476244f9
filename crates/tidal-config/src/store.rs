//! YAML file persistence for [`Settings`].
//!
//! # Design
//! - The file path is supplied by the caller; nothing here reads process-global state.
//! - `load` always yields usable settings. Failures travel beside the settings as an
//!   issue so the caller can inform the user and keep going on defaults.
//! - Saves write a sibling temp file and rename it over the target.
//! - Single attempt per operation; no retries, no locking.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::defaults::SCHEMA_VERSION;
use crate::error::{ConfigError, ConfigResult};
use crate::model::{Settings, SettingsDocument};
use crate::validate::validate_settings;

/// Outcome of [`ConfigStore::load`].
#[derive(Debug)]
pub struct LoadedSettings {
    /// Settings to run with. Defaults whenever the file could not be used.
    pub settings: Settings,
    /// Problem encountered while loading or persisting, if any.
    pub issue: Option<ConfigError>,
}

impl LoadedSettings {
    const fn clean(settings: Settings) -> Self {
        Self {
            settings,
            issue: None,
        }
    }

    fn fallback(issue: ConfigError) -> Self {
        Self {
            settings: Settings::default(),
            issue: Some(issue),
        }
    }

    /// Whether the settings were loaded (or created) without problems.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.issue.is_none()
    }

    /// Split into the settings and the optional issue.
    #[must_use]
    pub fn into_parts(self) -> (Settings, Option<ConfigError>) {
        (self.settings, self.issue)
    }
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    #[serde(flatten)]
    settings: &'a Settings,
}

/// Reads and writes the settings file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store for the given config file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the managed config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk, creating the file with defaults when it does not exist.
    ///
    /// The returned settings are always usable:
    /// - missing file: defaults, persisted; a failed persist is reported as `Save`.
    /// - unopenable or unreadable file: defaults with an `Open`/`Read` issue.
    /// - unparseable file: defaults with a `Parse` issue; the file is left untouched.
    #[must_use]
    pub fn load(&self) -> LoadedSettings {
        match self.read_document() {
            Ok(Some(document)) => {
                if document.version > SCHEMA_VERSION {
                    warn!(
                        path = %self.path.display(),
                        version = document.version,
                        supported = SCHEMA_VERSION,
                        "config file written by a newer version; unknown keys are ignored"
                    );
                }
                for warning in validate_settings(&document.settings) {
                    warn!(
                        path = %self.path.display(),
                        field = warning.field,
                        reason = warning.reason,
                        "suspicious config value"
                    );
                }
                debug!(path = %self.path.display(), "config loaded");
                LoadedSettings::clean(document.settings)
            }
            Ok(None) => {
                info!(path = %self.path.display(), "config file missing; writing defaults");
                let settings = Settings::default();
                match self.save(&settings) {
                    Ok(()) => LoadedSettings::clean(settings),
                    Err(err) => {
                        warn!(
                            path = %self.path.display(),
                            error = %err,
                            "failed to persist default config"
                        );
                        LoadedSettings::fallback(err)
                    }
                }
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "config unusable; continuing with defaults"
                );
                LoadedSettings::fallback(err)
            }
        }
    }

    /// Persist settings, creating the file when it does not exist.
    ///
    /// The document is written to a sibling `.tmp` file and renamed over the target, so a
    /// failed write never leaves a truncated config behind.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` when rendering fails, `Open` when an existing file cannot be
    /// opened for writing, and `Save` when the file cannot be created, written, or replaced.
    pub fn save(&self, settings: &Settings) -> ConfigResult<()> {
        let rendered = serde_yaml::to_string(&DocumentRef {
            version: SCHEMA_VERSION,
            settings,
        })
        .map_err(|source| ConfigError::Serialize { source })?;

        self.check_writable()?;
        let temp = temp_path(&self.path);
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(rendered.as_bytes())?;
            file.sync_all()
        });
        if let Err(source) = written.and_then(|()| fs::rename(&temp, &self.path)) {
            discard_temp(&temp);
            return Err(ConfigError::Save {
                path: self.path.clone(),
                source,
            });
        }
        debug!(path = %self.path.display(), bytes = rendered.len(), "config saved");
        Ok(())
    }

    fn check_writable(&self) -> ConfigResult<()> {
        match OpenOptions::new().write(true).open(&self.path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ConfigError::Open {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn read_document(&self) -> ConfigResult<Option<SettingsDocument>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Open {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| ConfigError::Read {
                path: self.path.clone(),
                source,
            })?;

        SettingsDocument::from_yaml(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn discard_temp(temp: &Path) {
    match fs::remove_file(temp) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            debug!(path = %temp.display(), error = %err, "leftover temp config not removed");
        }
        _ => {}
    }
}
