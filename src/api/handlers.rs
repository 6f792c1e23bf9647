//! Route handlers.
//!
//! Handlers only translate between HTTP and the [`Backend`](crate::backend::Backend)
//! operations; every rule about boards, lists and cards lives in the backend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::error::{ApiError, ErrorBody};
use super::AppState;
use crate::backend::{BackendError, CardFilter, CreateBoardArgs, CreateCardArgs, CreateListArgs, UpdateCardArgs};
use crate::constants::{ERROR_DATABASE_UNAVAILABLE, ERROR_TARGET_LIST_NOT_FOUND, HEALTH_OK};
use crate::entities::{board, card, list};

/// Query string of `POST /cards/{card_id}/move`.
#[derive(Debug, Deserialize)]
pub struct MoveQuery {
    pub target_list_id: i64,
}

// Boards

pub async fn create_board(
    State(state): State<AppState>,
    Json(args): Json<CreateBoardArgs>,
) -> Result<(StatusCode, Json<board::Model>), ApiError> {
    let board = state.backend().create_board(args).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<board::Model>>, ApiError> {
    Ok(Json(state.backend().list_boards().await?))
}

// Lists

pub async fn create_list(
    State(state): State<AppState>,
    Json(args): Json<CreateListArgs>,
) -> Result<(StatusCode, Json<list::Model>), ApiError> {
    let list = state.backend().create_list(args).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn list_lists_by_board(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<Vec<list::Model>>, ApiError> {
    Ok(Json(state.backend().list_lists_by_board(board_id).await?))
}

// Cards

pub async fn create_card(
    State(state): State<AppState>,
    Json(args): Json<CreateCardArgs>,
) -> Result<(StatusCode, Json<card::Model>), ApiError> {
    let card = state.backend().create_card(args).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn list_cards(
    State(state): State<AppState>,
    Query(filter): Query<CardFilter>,
) -> Result<Json<Vec<card::Model>>, ApiError> {
    Ok(Json(state.backend().list_cards(filter).await?))
}

pub async fn get_card(State(state): State<AppState>, Path(card_id): Path<i64>) -> Result<Json<card::Model>, ApiError> {
    Ok(Json(state.backend().get_card(card_id).await?))
}

pub async fn update_card(
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
    Json(args): Json<UpdateCardArgs>,
) -> Result<Json<card::Model>, ApiError> {
    Ok(Json(state.backend().update_card(card_id, args).await?))
}

pub async fn delete_card(State(state): State<AppState>, Path(card_id): Path<i64>) -> Result<StatusCode, ApiError> {
    state.backend().delete_card(card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_card(
    State(state): State<AppState>,
    Path(card_id): Path<i64>,
    Query(query): Query<MoveQuery>,
) -> Result<Json<card::Model>, ApiError> {
    let card = state
        .backend()
        .move_card(card_id, query.target_list_id)
        .await
        .map_err(|err| match err {
            BackendError::ParentNotFound { .. } => ApiError::NotFound(ERROR_TARGET_LIST_NOT_FOUND.to_string()),
            other => ApiError::from(other),
        })?;
    Ok(Json(card))
}

// Health

pub async fn health(State(state): State<AppState>) -> Response {
    match state.backend().health().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": HEALTH_OK }))).into_response(),
        Err(err) => {
            log::error!("Health check failed: {}", err);
            let body = ErrorBody {
                detail: ERROR_DATABASE_UNAVAILABLE.to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
