//! Relational backend implementation on SQLite via SeaORM.

use async_trait::async_trait;
use sea_orm::{ActiveValue, TransactionTrait};

use super::{
    Backend, BackendError, CardFilter, CreateBoardArgs, CreateCardArgs, CreateListArgs, EntityKind, UpdateCardArgs,
};
use crate::constants::BACKEND_SQLITE;
use crate::entities::{board, card, list};
use crate::repositories::{BoardRepository, CardRepository, ListRepository};
use crate::storage::LocalStorage;

/// SQLite backend implementation.
///
/// Every mutating operation runs in its own transaction, so a failed parent
/// check never leaves a partial write behind.
pub struct SqliteBackend {
    storage: LocalStorage,
}

impl SqliteBackend {
    /// Create a backend over an already opened storage.
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Open the database at `database_url` and wrap it in a backend.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        Ok(Self::new(LocalStorage::new(database_url, max_connections).await?))
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    fn backend_type(&self) -> &str {
        BACKEND_SQLITE
    }

    async fn create_board(&self, args: CreateBoardArgs) -> Result<board::Model, BackendError> {
        let board = BoardRepository::create(self.storage.conn(), args.name).await?;
        log::debug!("Created board {}", board.id);
        Ok(board)
    }

    async fn list_boards(&self) -> Result<Vec<board::Model>, BackendError> {
        Ok(BoardRepository::get_all(self.storage.conn()).await?)
    }

    async fn create_list(&self, args: CreateListArgs) -> Result<list::Model, BackendError> {
        let txn = self.storage.conn().begin().await?;

        if !BoardRepository::exists(&txn, args.board_id).await? {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::Board,
                id: args.board_id,
            });
        }

        let list = ListRepository::create(&txn, args.board_id, args.name).await?;
        txn.commit().await?;

        log::debug!("Created list {} on board {}", list.id, list.board_id);
        Ok(list)
    }

    async fn list_lists_by_board(&self, board_id: i64) -> Result<Vec<list::Model>, BackendError> {
        let conn = self.storage.conn();
        if !BoardRepository::exists(conn, board_id).await? {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::Board,
                id: board_id,
            });
        }

        Ok(ListRepository::get_for_board(conn, board_id).await?)
    }

    async fn create_card(&self, args: CreateCardArgs) -> Result<card::Model, BackendError> {
        let txn = self.storage.conn().begin().await?;

        if !ListRepository::exists(&txn, args.list_id).await? {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::List,
                id: args.list_id,
            });
        }

        let status = args.status_or_default();
        let new_card = card::ActiveModel {
            id: ActiveValue::NotSet,
            list_id: ActiveValue::Set(args.list_id),
            title: ActiveValue::Set(args.title),
            description: ActiveValue::Set(args.description),
            assignee: ActiveValue::Set(args.assignee),
            status: ActiveValue::Set(status),
        };
        let card = CardRepository::create(&txn, new_card).await?;
        txn.commit().await?;

        log::debug!("Created card {} in list {}", card.id, card.list_id);
        Ok(card)
    }

    async fn get_card(&self, card_id: i64) -> Result<card::Model, BackendError> {
        CardRepository::get_by_id(self.storage.conn(), card_id)
            .await?
            .ok_or(BackendError::NotFound {
                kind: EntityKind::Card,
                id: card_id,
            })
    }

    async fn list_cards(&self, filter: CardFilter) -> Result<Vec<card::Model>, BackendError> {
        Ok(CardRepository::get_filtered(self.storage.conn(), filter.status(), filter.assignee()).await?)
    }

    async fn update_card(&self, card_id: i64, args: UpdateCardArgs) -> Result<card::Model, BackendError> {
        let txn = self.storage.conn().begin().await?;

        let card = CardRepository::get_by_id(&txn, card_id)
            .await?
            .ok_or(BackendError::NotFound {
                kind: EntityKind::Card,
                id: card_id,
            })?;

        if args.is_empty() {
            return Ok(card);
        }

        let mut active_model: card::ActiveModel = card.into();
        if let Some(title) = args.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = args.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(assignee) = args.assignee {
            active_model.assignee = ActiveValue::Set(assignee);
        }
        if let Some(status) = args.status {
            active_model.status = ActiveValue::Set(status);
        }

        let card = CardRepository::update(&txn, active_model).await?;
        txn.commit().await?;

        log::debug!("Updated card {}", card.id);
        Ok(card)
    }

    async fn delete_card(&self, card_id: i64) -> Result<(), BackendError> {
        let removed = CardRepository::delete(self.storage.conn(), card_id).await?;
        if removed > 0 {
            log::debug!("Deleted card {}", card_id);
        }
        Ok(())
    }

    async fn move_card(&self, card_id: i64, target_list_id: i64) -> Result<card::Model, BackendError> {
        let txn = self.storage.conn().begin().await?;

        let card = CardRepository::get_by_id(&txn, card_id)
            .await?
            .ok_or(BackendError::NotFound {
                kind: EntityKind::Card,
                id: card_id,
            })?;

        if !ListRepository::exists(&txn, target_list_id).await? {
            return Err(BackendError::ParentNotFound {
                kind: EntityKind::List,
                id: target_list_id,
            });
        }

        let card = CardRepository::set_list(&txn, card, target_list_id).await?;
        txn.commit().await?;

        log::debug!("Moved card {} to list {}", card.id, target_list_id);
        Ok(card)
    }

    async fn health(&self) -> Result<(), BackendError> {
        Ok(self.storage.ping().await?)
    }

    async fn shutdown(&self) -> Result<(), BackendError> {
        self.storage.clone().close().await?;
        log::info!("Closed database connection");
        Ok(())
    }
}
