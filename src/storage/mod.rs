/// Storage layer for persisting habit data
///
/// The store persists its state as text blobs in a key-value store. This
/// module defines that key-value interface plus a SQLite-backed and an
/// in-memory implementation.

pub mod sqlite;
pub mod migrations;
pub mod memory;

// Re-export the main storage types
pub use sqlite::*;
pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

/// Keys used in the key-value store
pub mod keys {
    pub const HABITS: &str = "habits";
    pub const HABIT_ENTRIES: &str = "habitEntries";
    pub const STREAKS: &str = "streaks";
    pub const USER: &str = "user";
    pub const USER_ACHIEVEMENTS: &str = "userAchievements";
    pub const THEME: &str = "theme";

    /// Every key the store owns
    pub const ALL: [&str; 6] = [HABITS, HABIT_ENTRIES, STREAKS, USER, USER_ACHIEVEMENTS, THEME];
}

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Trait defining the key-value blob store the habit store persists into
///
/// Values are opaque text. Implementations must be safe to share across
/// tasks, but callers never issue overlapping writes to the same key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove several keys
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
