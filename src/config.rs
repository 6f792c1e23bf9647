//! Configuration management for minikanban
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    BACKEND_SNAPSHOT, BACKEND_SQLITE, CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, CONFIG_PATH_ENV,
    DEFAULT_API_KEY, DEFAULT_API_KEY_ENV, DEFAULT_BIND_ADDRESS, DEFAULT_DATABASE_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_CONNECTIONS, DEFAULT_SNAPSHOT_PATH,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the API listens on
    pub bind: String,
}

/// Shared-secret configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Value every request must send in the `x-api-key` header
    pub api_key: String,
    /// Environment variable that overrides `api_key` when set
    pub api_key_env: String,
}

/// Storage backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend type: "sqlite" or "snapshot"
    pub backend: String,
    pub sqlite: SqliteConfig,
    pub snapshot: SnapshotConfig,
}

/// Relational backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// SeaORM connection URL
    pub url: String,
    pub max_connections: u32,
}

/// Snapshot-file backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// JSON file loaded at startup and written at shutdown
    pub path: PathBuf,
    /// Also write the file after every change
    pub write_through: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Optional log file, in addition to stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BACKEND_SQLITE.to_string(),
            sqlite: SqliteConfig::default(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            write_through: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parsed level filter; `Off` when logging is disabled
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        if !self.enabled {
            return Ok(log::LevelFilter::Off);
        }
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Explicit path from the environment
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(explicit);
            if !path.exists() {
                anyhow::bail!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
            }
            return Ok(Some(path));
        }

        // 2. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 3. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.server.bind.parse::<SocketAddr>() {
            anyhow::bail!("Invalid server bind address '{}': {}", self.server.bind, e);
        }

        if self.auth.api_key.is_empty() {
            anyhow::bail!("auth.api_key cannot be empty");
        }

        self.validate_storage()?;
        self.logging.level_filter()?;

        Ok(())
    }

    /// Validate the selected backend and its settings
    fn validate_storage(&self) -> Result<()> {
        match self.storage.backend.as_str() {
            BACKEND_SQLITE => {
                if self.storage.sqlite.url.is_empty() {
                    anyhow::bail!("storage.sqlite.url cannot be empty");
                }
                if self.storage.sqlite.max_connections == 0 {
                    anyhow::bail!("storage.sqlite.max_connections must be at least 1");
                }
            }
            BACKEND_SNAPSHOT => {
                if self.storage.snapshot.path.as_os_str().is_empty() {
                    anyhow::bail!("storage.snapshot.path cannot be empty");
                }
            }
            backend => {
                anyhow::bail!(
                    "unsupported storage backend '{}'. Available backends: {}, {}",
                    backend,
                    BACKEND_SQLITE,
                    BACKEND_SNAPSHOT
                );
            }
        }

        Ok(())
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Invalid server bind address '{}'", self.server.bind))
    }

    /// API key in effect: the environment override when set, the file value otherwise
    pub fn resolve_api_key(&self) -> String {
        if !self.auth.api_key_env.is_empty() {
            if let Ok(value) = std::env::var(&self.auth.api_key_env) {
                if !value.is_empty() {
                    return value;
                }
            }
        }
        self.auth.api_key.clone()
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# minikanban Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
