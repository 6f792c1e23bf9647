//! HTTP API built on axum.
//!
//! ```text
//! POST   /boards                          create a board
//! GET    /boards                          list boards
//! POST   /lists                           create a list on a board
//! GET    /boards/{board_id}/lists         lists of a board
//! POST   /cards                           create a card in a list
//! GET    /cards?status=&assignee=         filter cards
//! GET    /cards/{card_id}                 fetch a card
//! PUT    /cards/{card_id}                 update supplied card fields
//! DELETE /cards/{card_id}                 delete a card
//! POST   /cards/{card_id}/move?target_list_id=N
//! GET    /health                          storage probe, no API key needed
//! ```

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{middleware, Router};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::backend::Backend;

pub mod auth;
pub mod error;
pub mod handlers;

pub use error::ApiError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn Backend>,
    api_key: Arc<str>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, api_key: impl Into<String>) -> Self {
        Self {
            backend,
            api_key: Arc::from(api_key.into()),
        }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/boards", post(handlers::create_board).get(handlers::list_boards))
        .route("/boards/:board_id/lists", get(handlers::list_lists_by_board))
        .route("/lists", post(handlers::create_list))
        .route("/cards", post(handlers::create_card).get(handlers::list_cards))
        .route(
            "/cards/:card_id",
            get(handlers::get_card)
                .put(handlers::update_card)
                .delete(handlers::delete_card),
        )
        .route("/cards/:card_id/move", post(handlers::move_card))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serve the API on `addr` until `shutdown` resolves, then drain open connections.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    log::info!(
        "Serving {} backend on http://{}",
        state.backend().backend_type(),
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    log::info!("HTTP server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::info!("Shutdown signal received");
}
