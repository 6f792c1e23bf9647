//! minikanban - a small Kanban backend
//!
//! This library exposes boards, lists and cards through a key-authenticated
//! HTTP API. State is kept either in SQLite or in a JSON snapshot file; both
//! storage backends implement the same [`backend::Backend`] trait and enforce
//! the same rules about parent references and identifier assignment.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`api`] - HTTP routes, API key check and error mapping
//! * [`backend`] - Storage-agnostic operations and their two implementations
//! * [`config`] - Application configuration management
//! * [`storage`] - Database connection, in-memory entity store and snapshot file
//! * [`repositories`] - SeaORM queries used by the SQLite backend

/// HTTP API layer
pub mod api;

/// Backend abstraction layer over the two storage engines
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Logging setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Local storage: SQLite connection, entity store and snapshot file
pub mod storage;

// Re-export entity models for convenient access
pub use entities::{board, card, list};
