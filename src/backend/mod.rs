//! Backend abstraction layer for interchangeable storage.
//!
//! This module defines the common interface that every storage backend must
//! implement, along with the argument types and error handling shared by the
//! relational and snapshot-file adapters. Each operation validates the parent
//! references it depends on before mutating anything.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::fmt;

use crate::constants::DEFAULT_CARD_STATUS;
use crate::entities::{board, card, list};

pub mod factory;
pub mod snapshot;
pub mod sqlite;

pub use factory::create_backend;
pub use snapshot::SnapshotBackend;
pub use sqlite::SqliteBackend;

/// Kinds of record held by a backend, used to describe lookups that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    List,
    Card,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Board => "board",
            EntityKind::List => "list",
            EntityKind::Card => "card",
        };
        f.write_str(name)
    }
}

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The record addressed by the operation does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },

    /// A board or list referenced as a parent does not exist.
    #[error("parent {kind} not found: {id}")]
    ParentNotFound { kind: EntityKind, id: i64 },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sea_orm::DbErr> for BackendError {
    fn from(err: sea_orm::DbErr) -> Self {
        BackendError::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        BackendError::Storage(format!("{err:#}"))
    }
}

/// Arguments for creating a new board.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateBoardArgs {
    pub name: String,
}

/// Arguments for creating a new list.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateListArgs {
    pub board_id: i64,
    pub name: String,
}

/// Arguments for creating a new card.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateCardArgs {
    pub list_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateCardArgs {
    /// Create arguments for a card with only the required fields set.
    pub fn new(list_id: i64, title: impl Into<String>) -> Self {
        Self {
            list_id,
            title: title.into(),
            description: None,
            assignee: None,
            status: None,
        }
    }

    /// Status to store, falling back to the default workflow state.
    pub fn status_or_default(&self) -> String {
        self.status.clone().unwrap_or_else(|| DEFAULT_CARD_STATUS.to_string())
    }
}

/// Arguments for updating a card.
///
/// Only the fields present in the request are applied. For the nullable
/// fields the outer `Option` records presence and the inner one the value,
/// so an explicit `null` clears the field while an absent key keeps it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateCardArgs {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateCardArgs {
    /// True when the update carries no field to change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.assignee.is_none() && self.status.is_none()
    }

    /// Merge the supplied fields into `card`, leaving `id` and `list_id` alone.
    pub fn apply_to(&self, card: &mut card::Model) {
        if let Some(title) = &self.title {
            card.title = title.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(assignee) = &self.assignee {
            card.assignee = assignee.clone();
        }
        if let Some(status) = &self.status {
            card.status = status.clone();
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Optional filters for listing cards. Both filters must match when given.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CardFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl CardFilter {
    /// Status filter, treating an empty string as "no filter".
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    /// Assignee filter, treating an empty string as "no filter".
    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref().filter(|a| !a.is_empty())
    }

    /// Whether `card` satisfies every filter that is set.
    pub fn matches(&self, card: &card::Model) -> bool {
        self.status().map_or(true, |status| card.status == status)
            && self
                .assignee()
                .map_or(true, |assignee| card.assignee.as_deref() == Some(assignee))
    }
}

/// Backend trait that all storage backends must implement.
///
/// This trait is the single capability set the HTTP layer talks to. Exactly
/// one implementation is selected at startup and used for the lifetime of
/// the process.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "sqlite", "snapshot").
    fn backend_type(&self) -> &str;

    // Boards
    async fn create_board(&self, args: CreateBoardArgs) -> Result<board::Model, BackendError>;
    async fn list_boards(&self) -> Result<Vec<board::Model>, BackendError>;

    // Lists
    async fn create_list(&self, args: CreateListArgs) -> Result<list::Model, BackendError>;
    async fn list_lists_by_board(&self, board_id: i64) -> Result<Vec<list::Model>, BackendError>;

    // Cards
    async fn create_card(&self, args: CreateCardArgs) -> Result<card::Model, BackendError>;
    async fn get_card(&self, card_id: i64) -> Result<card::Model, BackendError>;
    async fn list_cards(&self, filter: CardFilter) -> Result<Vec<card::Model>, BackendError>;
    async fn update_card(&self, card_id: i64, args: UpdateCardArgs) -> Result<card::Model, BackendError>;
    /// Delete a card. Deleting a card that does not exist succeeds.
    async fn delete_card(&self, card_id: i64) -> Result<(), BackendError>;
    async fn move_card(&self, card_id: i64, target_list_id: i64) -> Result<card::Model, BackendError>;

    /// Check that the underlying storage is reachable.
    async fn health(&self) -> Result<(), BackendError>;

    /// Flush and release storage resources at orderly shutdown.
    async fn shutdown(&self) -> Result<(), BackendError>;
}
