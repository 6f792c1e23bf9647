//! List repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::list;

/// Repository for list-related database operations.
pub struct ListRepository;

impl ListRepository {
    /// Get a single list by id.
    pub async fn get_by_id<C>(conn: &C, id: i64) -> Result<Option<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find_by_id(id).one(conn).await?)
    }

    /// Check whether a list exists.
    pub async fn exists<C>(conn: &C, id: i64) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Self::get_by_id(conn, id).await?.is_some())
    }

    /// Get all lists belonging to a board, in creation order.
    pub async fn get_for_board<C>(conn: &C, board_id: i64) -> Result<Vec<list::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(list::Entity::find()
            .filter(list::Column::BoardId.eq(board_id))
            .order_by_asc(list::Column::Id)
            .all(conn)
            .await?)
    }

    /// Create a new list on a board.
    pub async fn create<C>(conn: &C, board_id: i64, name: String) -> Result<list::Model>
    where
        C: ConnectionTrait,
    {
        let list = list::ActiveModel {
            id: ActiveValue::NotSet,
            board_id: ActiveValue::Set(board_id),
            name: ActiveValue::Set(name),
        };
        Ok(list.insert(conn).await?)
    }
}
