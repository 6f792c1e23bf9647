//! JSON snapshot document for the snapshot-file backend.
//!
//! The whole store is kept in one pretty-printed JSON document with three
//! named arrays (`boards`, `lists`, `cards`) plus the identifier sequences.
//! Documents without `next_ids` are accepted; the sequences are then derived
//! from the highest stored ids.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::store::IdSequences;
use crate::backend::BackendError;
use crate::entities::{board, card, list};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub boards: Vec<board::Model>,
    #[serde(default)]
    pub lists: Vec<list::Model>,
    #[serde(default)]
    pub cards: Vec<card::Model>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_ids: Option<IdSequences>,
}

impl Snapshot {
    /// Read a snapshot from `path`. Returns `None` when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, BackendError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;

        log::debug!(
            "Loaded snapshot from {} ({} boards, {} lists, {} cards)",
            path.display(),
            snapshot.boards.len(),
            snapshot.lists.len(),
            snapshot.cards.len()
        );

        Ok(Some(snapshot))
    }

    /// Write the snapshot to `path`, replacing any previous file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BackendError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;

        // Write to temp file, then rename over the target
        let temp_path = temp_path_for(path);
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, path)?;

        log::debug!("Saved snapshot to {}", path.display());
        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
