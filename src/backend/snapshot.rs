//! Snapshot-file backend implementation.
//!
//! All state lives in an [`EntityStore`] held behind an async mutex, which
//! serializes identifier assignment and every mutation. The store is loaded
//! from the snapshot file when the backend opens and written back wholesale
//! on shutdown, or after every mutation when write-through is enabled.
//!
//! With write-through, a mutation is applied to a copy of the store and the
//! copy replaces the live store only once it is on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{Backend, BackendError, CardFilter, CreateBoardArgs, CreateCardArgs, CreateListArgs, UpdateCardArgs};
use crate::constants::BACKEND_SNAPSHOT;
use crate::entities::{board, card, list};
use crate::storage::{EntityStore, Snapshot};

/// Snapshot-file backend implementation.
pub struct SnapshotBackend {
    store: Mutex<EntityStore>,
    path: PathBuf,
    write_through: bool,
}

impl SnapshotBackend {
    /// Open the snapshot at `path`, starting empty when the file does not exist.
    pub fn open(path: impl AsRef<Path>, write_through: bool) -> Result<Self, BackendError> {
        let path = path.as_ref().to_path_buf();
        let store = match Snapshot::load(&path)? {
            Some(snapshot) => EntityStore::from_snapshot(snapshot)?,
            None => {
                log::info!("No snapshot at {}, starting with an empty store", path.display());
                EntityStore::new()
            }
        };

        Ok(Self {
            store: Mutex::new(store),
            path,
            write_through,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current state as it would be written to disk.
    pub async fn snapshot(&self) -> Snapshot {
        self.store.lock().await.to_snapshot()
    }

    /// Write the current state to the snapshot file.
    pub async fn flush(&self) -> Result<(), BackendError> {
        let store = self.store.lock().await;
        save_snapshot(store.to_snapshot(), self.path.clone()).await
    }

    /// Run `op` against the store as one all-or-nothing change.
    async fn mutate<T, F>(&self, op: F) -> Result<T, BackendError>
    where
        F: FnOnce(&mut EntityStore) -> Result<T, BackendError> + Send,
        T: Send,
    {
        let mut store = self.store.lock().await;
        if !self.write_through {
            return op(&mut store);
        }

        let mut staged = store.clone();
        let value = op(&mut staged)?;
        save_snapshot(staged.to_snapshot(), self.path.clone()).await?;
        *store = staged;
        Ok(value)
    }
}

/// Write `snapshot` off the async worker threads.
async fn save_snapshot(snapshot: Snapshot, path: PathBuf) -> Result<(), BackendError> {
    tokio::task::spawn_blocking(move || snapshot.save(&path))
        .await
        .map_err(|e| BackendError::Storage(format!("Snapshot writer failed: {e}")))?
}

#[async_trait]
impl Backend for SnapshotBackend {
    fn backend_type(&self) -> &str {
        BACKEND_SNAPSHOT
    }

    async fn create_board(&self, args: CreateBoardArgs) -> Result<board::Model, BackendError> {
        self.mutate(|store| store.create_board(args)).await
    }

    async fn list_boards(&self) -> Result<Vec<board::Model>, BackendError> {
        Ok(self.store.lock().await.boards().to_vec())
    }

    async fn create_list(&self, args: CreateListArgs) -> Result<list::Model, BackendError> {
        self.mutate(|store| store.create_list(args)).await
    }

    async fn list_lists_by_board(&self, board_id: i64) -> Result<Vec<list::Model>, BackendError> {
        self.store.lock().await.lists_by_board(board_id)
    }

    async fn create_card(&self, args: CreateCardArgs) -> Result<card::Model, BackendError> {
        self.mutate(|store| store.create_card(args)).await
    }

    async fn get_card(&self, card_id: i64) -> Result<card::Model, BackendError> {
        self.store.lock().await.get_card(card_id)
    }

    async fn list_cards(&self, filter: CardFilter) -> Result<Vec<card::Model>, BackendError> {
        Ok(self.store.lock().await.list_cards(&filter))
    }

    async fn update_card(&self, card_id: i64, args: UpdateCardArgs) -> Result<card::Model, BackendError> {
        self.mutate(|store| store.update_card(card_id, &args)).await
    }

    async fn delete_card(&self, card_id: i64) -> Result<(), BackendError> {
        // Nothing to write for a card that is already gone
        if self.store.lock().await.get_card(card_id).is_err() {
            return Ok(());
        }
        self.mutate(|store| {
            store.delete_card(card_id);
            Ok(())
        })
        .await
    }

    async fn move_card(&self, card_id: i64, target_list_id: i64) -> Result<card::Model, BackendError> {
        self.mutate(|store| store.move_card(card_id, target_list_id)).await
    }

    async fn health(&self) -> Result<(), BackendError> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        self.flush().await?;
        log::info!("Flushed snapshot to {}", self.path.display());
        Ok(())
    }
}
