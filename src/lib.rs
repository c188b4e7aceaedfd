/// Public library interface for the Mood Journal MCP server
///
/// This module exports the journal server and the public types used by
/// the binary and by tests: the mood data model, the entry store and
/// repository, and the aggregation engine.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod analytics;
mod domain;
mod mcp;
mod repository;
mod storage;
mod tools;

// Re-export public modules and types
pub use analytics::{AggregationEngine, DaySummary, MonthSummary};
pub use domain::*;
pub use repository::EntryRepository;
pub use storage::{
    EntryStore, KeyValueBackend, MemoryBackend, SqliteBackend, StorageError, StoreFailure,
    StoreOperation, STORAGE_KEY,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mood journal server that speaks the MCP protocol
///
/// This server keeps the journal in a key-value backend (SQLite by default)
/// and exposes tools for logging moods and reading back days, lists and
/// monthly averages.
pub struct MoodJournalServer<B: KeyValueBackend = SqliteBackend> {
    repository: EntryRepository<B>,
    analytics: AggregationEngine,
}

impl MoodJournalServer<SqliteBackend> {
    /// Create a new server backed by the SQLite database at `db_path`
    ///
    /// This will initialize the database schema if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Mood Journal server with database: {:?}", db_path);

        let backend = SqliteBackend::new(db_path)?;
        Ok(Self::with_backend(backend))
    }
}

impl<B: KeyValueBackend> MoodJournalServer<B> {
    /// Create a server over any key-value backend
    pub fn with_backend(backend: B) -> Self {
        Self {
            repository: EntryRepository::from_backend(backend),
            analytics: AggregationEngine::new(),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let journal = self.repository.all_entries();
        if let Some(failure) = self.repository.last_failure() {
            tracing::warn!("Journal could not be read, starting empty: {}", failure.message);
        }
        tracing::info!(
            "Server started successfully, found {} entries across {} days",
            journal.entry_count(),
            journal.day_count()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the entry repository
    pub fn repository(&self) -> &EntryRepository<B> {
        &self.repository
    }

    /// Get a reference to the aggregation engine
    pub fn analytics(&self) -> &AggregationEngine {
        &self.analytics
    }
}
