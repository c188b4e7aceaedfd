/// SQLite implementation of the key-value backend
///
/// Each slot is one row in `kv_store`. Writes are upserts, so a slot is
/// always replaced wholesale.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, KeyValueBackend, StorageError};

/// SQLite-based key-value slots
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a private in-memory database, mostly useful for tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        tracing::debug!("Read slot {} ({} bytes)", key, value.as_ref().map_or(0, String::len));
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Wrote slot {} ({} bytes)", key, value.len());
        Ok(())
    }
}
