/// Public library interface for the habit store
///
/// This module exports the habit store, the domain types it manages, the
/// key-value persistence backends and the statistics helpers used by the
/// command-line front end and by tests.

use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod store;

// Re-export public modules and types
pub use domain::*;
pub use storage::{keys, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};
pub use analytics::{AnalyticsEngine, HabitCompletionCount, WeeklySummary};
pub use store::{AppState, Command, HabitStore, ImportError, Snapshot, EXPORT_VERSION};

/// Errors returned by habit store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("Failed to import data: {0}")]
    Import(#[from] store::ImportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
