//! Board repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::board;

/// Repository for board-related database operations.
pub struct BoardRepository;

impl BoardRepository {
    /// Get all boards in creation order.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find().order_by_asc(board::Column::Id).all(conn).await?)
    }

    /// Get a single board by id.
    pub async fn get_by_id<C>(conn: &C, id: i64) -> Result<Option<board::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(board::Entity::find_by_id(id).one(conn).await?)
    }

    /// Check whether a board exists.
    pub async fn exists<C>(conn: &C, id: i64) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Self::get_by_id(conn, id).await?.is_some())
    }

    /// Create a new board. The database assigns the id.
    pub async fn create<C>(conn: &C, name: String) -> Result<board::Model>
    where
        C: ConnectionTrait,
    {
        let board = board::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(name),
        };
        Ok(board.insert(conn).await?)
    }
}
