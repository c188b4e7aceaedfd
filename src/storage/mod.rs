/// Storage layer for persisting mood entries
///
/// Persistence is a single key-value slot holding the whole journal as one
/// JSON blob. The slot lives behind the `KeyValueBackend` trait so the
/// SQLite backend used by the server can be swapped for an in-memory one in
/// tests.

pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

// Re-export the main storage types
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::*;

use thiserror::Error;

/// Key the journal blob is stored under
pub const STORAGE_KEY: &str = "myDayMoodEntries";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// A persistent string slot store
///
/// This trait allows us to swap the SQLite slot for other media (or an
/// in-memory fake) while keeping the same interface.
pub trait KeyValueBackend {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
