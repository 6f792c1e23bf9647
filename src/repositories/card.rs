//! Card repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::card;

/// Repository for card-related database operations.
pub struct CardRepository;

impl CardRepository {
    /// Get a single card by id.
    pub async fn get_by_id<C>(conn: &C, id: i64) -> Result<Option<card::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(card::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get cards in creation order, optionally narrowed by status and assignee.
    pub async fn get_filtered<C>(conn: &C, status: Option<&str>, assignee: Option<&str>) -> Result<Vec<card::Model>>
    where
        C: ConnectionTrait,
    {
        let mut query = card::Entity::find();
        if let Some(status) = status {
            query = query.filter(card::Column::Status.eq(status));
        }
        if let Some(assignee) = assignee {
            query = query.filter(card::Column::Assignee.eq(assignee));
        }

        Ok(query.order_by_asc(card::Column::Id).all(conn).await?)
    }

    /// Insert a new card.
    pub async fn create<C>(conn: &C, card: card::ActiveModel) -> Result<card::Model>
    where
        C: ConnectionTrait,
    {
        Ok(card.insert(conn).await?)
    }

    /// Update a card in the database.
    pub async fn update<C>(conn: &C, card: card::ActiveModel) -> Result<card::Model>
    where
        C: ConnectionTrait,
    {
        Ok(card.update(conn).await?)
    }

    /// Point a card at another list.
    pub async fn set_list<C>(conn: &C, card: card::Model, list_id: i64) -> Result<card::Model>
    where
        C: ConnectionTrait,
    {
        let mut active_model: card::ActiveModel = card.into();
        active_model.list_id = ActiveValue::Set(list_id);
        Self::update(conn, active_model).await
    }

    /// Delete a card by id. Returns the number of rows removed.
    pub async fn delete<C>(conn: &C, id: i64) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = card::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }
}
