//! Shared-secret check applied to every API route.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::AppState;
use crate::constants::API_KEY_HEADER;

/// Reject requests whose `x-api-key` header is missing or differs from the configured key.
pub async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided != Some(state.api_key()) {
        log::warn!("Rejected {} {}: invalid API key", request.method(), request.uri().path());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(request).await)
}
