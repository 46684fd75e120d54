//! File-backed snapshot of the last saved editor state.
//!
//! The snapshot is stored verbatim; no schema is enforced on save.

use crate::error::StorageError;
use log::{debug, info};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

const SNAPSHOT_FILE: &str = "saved.json";

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error(&self.dir, e))
    }

    pub async fn save(&self, snapshot: &Value) -> Result<(), StorageError> {
        let path = self.path();
        let body = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| io_error(&path, e))?;
        info!("Saved snapshot to {}", path.display());
        Ok(())
    }

    /// Returns the stored snapshot, or empty collections if nothing was saved yet.
    pub async fn load(&self) -> Result<Value, StorageError> {
        let path = self.path();
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}, returning empty data", path.display());
                return Ok(empty_snapshot());
            }
            Err(e) => return Err(io_error(&path, e)),
        };
        Ok(serde_json::from_slice(&raw)?)
    }
}

pub fn empty_snapshot() -> Value {
    json!({ "courses": [], "teachers": [], "rooms": [], "slots": [] })
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
