/// SQLite implementation of the key-value store
///
/// Each key is one row in the `kv` table. The connection is guarded by a
/// mutex so the store can be shared with async callers; every operation is
/// a single short statement.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, KeyValueStore, StorageError};

/// SQLite-based key-value store
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Open (or create) the database file and run migrations
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite key-value store initialized at: {:?}", db_path);

        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Number of keys currently stored
    pub fn len(&self) -> Result<usize, StorageError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Connection("Database connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.lock()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now()],
        )?;

        tracing::debug!("Stored key '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;

        tracing::debug!("Removed key '{}'", key);
        Ok(())
    }

    /// Remove several keys in one transaction
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        for key in keys {
            tx.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        }
        tx.commit()?;

        tracing::debug!("Removed {} keys", keys.len());
        Ok(())
    }
}
