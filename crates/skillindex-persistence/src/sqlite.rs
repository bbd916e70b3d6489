use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::KeyValueStore;

/// Key-value store persisted in a SQLite database file
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_path`
    pub async fn new(database_path: &str) -> Result<Self> {
        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| format!("Failed to open cache database {}", database_path))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!("Cache store initialized with database: {}", database_path);
        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create cache_entries table")?;

        debug!("Cache store migrations completed");
        Ok(())
    }

    /// Number of stored entries
    pub async fn len(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM cache_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("count"))
    }

    /// Close the underlying pool, waiting for connections to be released
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM cache_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read cache entry {}", key))?;

        Ok(row.map(|row| row.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO cache_entries (key, value, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to write cache entry {}", key))?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let result = sqlx::query("DELETE FROM cache_entries")
            .execute(&self.pool)
            .await
            .context("Failed to clear cache entries")?;

        info!("Cleared {} cache entries", result.rows_affected());
        Ok(())
    }
}
