//! Durable key-value storage for SkillIndex
//!
//! The star-count cache only needs string keys mapped to string values that
//! survive restarts. [`SqliteStore`] is the production backend and
//! [`MemoryStore`] backs tests and the `memory` cache configuration.

mod memory;
mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String key to string value store shared by the metadata cache
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove every stored entry
    async fn clear(&self) -> Result<()>;
}
