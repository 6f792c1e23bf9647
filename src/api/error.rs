//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::{BackendError, EntityKind};
use crate::constants::{
    ERROR_BOARD_NOT_FOUND, ERROR_CARD_NOT_FOUND, ERROR_INTERNAL, ERROR_INVALID_API_KEY, ERROR_LIST_NOT_FOUND,
};

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API Key")]
    Unauthorized,

    /// Lookup failure with the message to send back.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ApiError {
    /// Message for a missing record of the given kind.
    pub fn not_found_message(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Board => ERROR_BOARD_NOT_FOUND,
            EntityKind::List => ERROR_LIST_NOT_FOUND,
            EntityKind::Card => ERROR_CARD_NOT_FOUND,
        }
    }

    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::Unauthorized => (StatusCode::FORBIDDEN, ERROR_INVALID_API_KEY.to_string()),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.clone()),
            ApiError::Backend(BackendError::NotFound { kind, .. })
            | ApiError::Backend(BackendError::ParentNotFound { kind, .. }) => {
                (StatusCode::NOT_FOUND, Self::not_found_message(*kind).to_string())
            }
            ApiError::Backend(err) => {
                log::error!("Backend failure: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, ERROR_INTERNAL.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorBody { detail })).into_response()
    }
}
