use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

/// Local storage manager for the relational backend
#[derive(Clone)]
pub struct LocalStorage {
    pub(crate) conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open the `SQLite` database at `database_url` and make sure the schema exists
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let mut options = ConnectOptions::new(database_url.to_string());
        options
            .min_connections(1)
            .max_connections(Self::pool_size(database_url, max_connections))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;

        let storage = LocalStorage { conn };
        storage.init_schema().await?;

        log::info!("Opened database {}", database_url);
        Ok(storage)
    }

    /// Open a private in-memory database (used by tests)
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:", 1).await
    }

    /// Every pooled connection to `:memory:` would see its own empty database
    fn pool_size(database_url: &str, max_connections: u32) -> u32 {
        if database_url.contains(":memory:") || database_url.contains("mode=memory") {
            1
        } else {
            max_connections.max(1)
        }
    }

    /// Database connection handle
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        // AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again
        self.conn
            .execute_unprepared(
                r"
                CREATE TABLE IF NOT EXISTS boards (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL
                )
                ",
            )
            .await
            .context("Failed to create boards table")?;

        // Parent references are checked by the backend, not by the database
        self.conn
            .execute_unprepared(
                r"
                CREATE TABLE IF NOT EXISTS lists (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    board_id INTEGER NOT NULL,
                    name TEXT NOT NULL
                )
                ",
            )
            .await
            .context("Failed to create lists table")?;

        self.conn
            .execute_unprepared(
                r"
                CREATE TABLE IF NOT EXISTS cards (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    list_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT,
                    assignee TEXT,
                    status TEXT NOT NULL DEFAULT 'todo'
                )
                ",
            )
            .await
            .context("Failed to create cards table")?;

        self.conn
            .execute_unprepared("CREATE INDEX IF NOT EXISTS idx_lists_board_id ON lists (board_id)")
            .await?;
        self.conn
            .execute_unprepared("CREATE INDEX IF NOT EXISTS idx_cards_list_id ON cards (list_id)")
            .await?;

        Ok(())
    }

    /// Run a trivial query to check the connection
    pub async fn ping(&self) -> Result<()> {
        self.conn.execute_unprepared("SELECT 1").await?;
        Ok(())
    }

    /// Close the underlying connection pool
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
