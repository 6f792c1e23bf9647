//! Constants used throughout the application
//!
//! This module centralizes magic strings, response messages, and default
//! values to improve maintainability and consistency.

// HTTP
/// Header carrying the shared secret on every authenticated request
pub const API_KEY_HEADER: &str = "x-api-key";

// Defaults
pub const DEFAULT_API_KEY: &str = "api_authorization_key";
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://minikanban.db?mode=rwc";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data.json";
pub const DEFAULT_CARD_STATUS: &str = "todo";
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Maximum pooled database connections for the relational backend
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;

// Backend identifiers
pub const BACKEND_SQLITE: &str = "sqlite";
pub const BACKEND_SNAPSHOT: &str = "snapshot";

// Configuration file discovery
pub const CONFIG_FILE_NAME: &str = "minikanban.toml";
pub const CONFIG_DIR_NAME: &str = "minikanban";
pub const CONFIG_PATH_ENV: &str = "MINIKANBAN_CONFIG";

// Response messages
pub const ERROR_INVALID_API_KEY: &str = "Invalid API Key";
pub const ERROR_BOARD_NOT_FOUND: &str = "Board not found";
pub const ERROR_LIST_NOT_FOUND: &str = "List not found";
pub const ERROR_TARGET_LIST_NOT_FOUND: &str = "Target list not found";
pub const ERROR_CARD_NOT_FOUND: &str = "Card not found";
pub const ERROR_DATABASE_UNAVAILABLE: &str = "Database connection failed";
pub const ERROR_INTERNAL: &str = "Internal server error";
pub const HEALTH_OK: &str = "OK";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
