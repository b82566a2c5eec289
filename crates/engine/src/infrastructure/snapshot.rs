//! JSON file snapshot adapter.
//!
//! The durable record is one namespaced JSON document. Writes go through a
//! temp file and an atomic rename so a crash mid-save never leaves a torn
//! snapshot behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::infrastructure::ports::{SnapshotError, SnapshotPort, StateSnapshot};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_STATE_FILE: &str = "blackwood_state.json";

/// File-backed implementation of [`SnapshotPort`].
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `STATE_FILE`, falling back to the default.
    pub fn from_env() -> Self {
        let path = std::env::var("STATE_FILE").unwrap_or_else(|_| DEFAULT_STATE_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotPort for JsonSnapshotStore {
    fn load(&self) -> Result<Option<StateSnapshot>, SnapshotError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| SnapshotError::Io(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &StateSnapshot) -> Result<(), SnapshotError> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| SnapshotError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| SnapshotError::Io(e.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| SnapshotError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
