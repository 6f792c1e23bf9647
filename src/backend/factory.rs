//! Backend factory for creating the configured backend.

use anyhow::{anyhow, Result};
use std::sync::Arc;

use super::{Backend, SnapshotBackend, SqliteBackend};
use crate::config::StorageConfig;
use crate::constants::{BACKEND_SNAPSHOT, BACKEND_SQLITE};

/// Create the backend selected by the storage configuration.
///
/// # Errors
/// Returns error if:
/// - Backend type is unknown
/// - The database cannot be opened
/// - The snapshot file exists but cannot be read or parsed
pub async fn create_backend(config: &StorageConfig) -> Result<Arc<dyn Backend>> {
    match config.backend.as_str() {
        BACKEND_SQLITE => {
            let backend = SqliteBackend::connect(&config.sqlite.url, config.sqlite.max_connections).await?;
            Ok(Arc::new(backend))
        }
        BACKEND_SNAPSHOT => {
            let backend = SnapshotBackend::open(&config.snapshot.path, config.snapshot.write_through)?;
            log::info!("Using snapshot file {}", backend.path().display());
            Ok(Arc::new(backend))
        }
        other => Err(anyhow!("Unknown backend type: {}", other)),
    }
}
