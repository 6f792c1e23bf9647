//! Local storage module for kanban data persistence
//!
//! This module provides:
//! - `db`: the SQLite connection and schema used by the relational backend
//! - `store`: the in-memory entity store with identifier sequences
//! - `snapshot`: the JSON snapshot document read at startup and written at shutdown

pub mod db;
pub mod snapshot;
pub mod store;

pub use db::LocalStorage;
pub use snapshot::Snapshot;
pub use store::{EntityStore, IdSequences};
