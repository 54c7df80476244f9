//! JSON-backed session database.
//!
//! # Design
//! - One small document per session database path; torrents are not tracked yet.
//! - Writes go to a sibling temp file and are renamed into place.
//! - An existing but undecodable file is an error; it is never overwritten.

#![allow(clippy::redundant_pub_crate)]

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

const DATABASE_VERSION: u32 = 1;

/// Persisted session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionState {
    pub(crate) version: u32,
    pub(crate) session_id: Uuid,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default)]
    pub(crate) last_flushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) start_count: u64,
}

impl SessionState {
    fn fresh() -> Self {
        Self {
            version: DATABASE_VERSION,
            session_id: Uuid::new_v4(),
            created_at: Utc::now(),
            last_flushed_at: None,
            start_count: 0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SessionDatabase {
    path: PathBuf,
    state: SessionState,
}

impl SessionDatabase {
    /// Open or create the database and record a new start.
    pub(crate) async fn open(path: PathBuf) -> EngineResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| EngineError::Io {
                    operation: "database.create_parent",
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let mut state = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<SessionState>(&bytes).map_err(|source| {
                EngineError::Database {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => SessionState::fresh(),
            Err(source) => {
                return Err(EngineError::Io {
                    operation: "database.read",
                    path,
                    source,
                });
            }
        };
        state.start_count = state.start_count.saturating_add(1);

        let mut database = Self { path, state };
        database.flush().await?;
        Ok(database)
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Stamp the flush time and write the document atomically.
    pub(crate) async fn flush(&mut self) -> EngineResult<()> {
        self.state.last_flushed_at = Some(Utc::now());
        let bytes =
            serde_json::to_vec_pretty(&self.state).map_err(|source| EngineError::Database {
                path: self.path.clone(),
                source,
            })?;

        let temp = temp_path(&self.path);
        fs::write(&temp, &bytes)
            .await
            .map_err(|source| EngineError::Io {
                operation: "database.write",
                path: temp.clone(),
                source,
            })?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|source| EngineError::Io {
                operation: "database.rename",
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_creates_and_counts_starts() -> Result<(), Box<dyn Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("session.db");

        let first = SessionDatabase::open(path.clone()).await?;
        assert_eq!(first.state().start_count, 1);
        assert!(first.state().last_flushed_at.is_some());
        let session_id = first.state().session_id;
        drop(first);

        let second = SessionDatabase::open(path.clone()).await?;
        assert_eq!(second.state().start_count, 2);
        assert_eq!(second.state().session_id, session_id);
        assert_eq!(second.path(), path.as_path());
        assert!(!temp_path(&path).exists());
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_database_is_rejected_and_kept() -> Result<(), Box<dyn Error>> {
        let dir = TempDir::new()?;
        let path = dir.path().join("session.db");
        std::fs::write(&path, b"{ not json")?;

        let err = SessionDatabase::open(path.clone())
            .await
            .err()
            .ok_or("corrupt database must not open")?;
        assert!(matches!(err, EngineError::Database { .. }));
        assert_eq!(std::fs::read(&path)?, b"{ not json");
        Ok(())
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("/var/tidal/session.db")),
            PathBuf::from("/var/tidal/session.db.tmp")
        );
    }
}
