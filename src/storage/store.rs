/// Entry store - whole-journal persistence over a key-value backend
///
/// The journal is read in full and written in full on every save. Failures
/// never reach the caller of `load` or `append`: reads degrade to an empty
/// journal and writes are dropped, both logged. The most recent swallowed
/// failure is kept so callers that care can still find out.

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, error};

use crate::domain::{truncate_note, DayEntries, MoodEntry};
use crate::storage::{KeyValueBackend, StorageError, STORAGE_KEY};

/// Which store operation a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Load,
    Append,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOperation::Load => f.write_str("load"),
            StoreOperation::Append => f.write_str("append"),
        }
    }
}

/// A failure that was logged and swallowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub operation: StoreOperation,
    pub message: String,
}

/// Reads and writes the whole journal under one fixed key
pub struct EntryStore<B: KeyValueBackend> {
    backend: B,
    key: String,
    last_failure: RefCell<Option<StoreFailure>>,
}

impl<B: KeyValueBackend> EntryStore<B> {
    /// Create a store using the default journal key
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            last_failure: RefCell::new(None),
        }
    }

    /// The backend this store writes to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the journal, reporting any failure
    ///
    /// A missing or blank slot is an empty journal, not an error.
    pub fn try_load(&self) -> Result<DayEntries, StorageError> {
        match self.backend.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(DayEntries::new()),
        }
    }

    /// Read the journal, falling back to an empty one if anything goes wrong
    pub fn load(&self) -> DayEntries {
        match self.try_load() {
            Ok(entries) => {
                self.clear_failure(StoreOperation::Load);
                debug!("Loaded {} entries across {} days", entries.entry_count(), entries.day_count());
                entries
            }
            Err(e) => {
                error!("Error reading journal from storage: {}", e);
                self.record_failure(StoreOperation::Load, &e);
                DayEntries::new()
            }
        }
    }

    /// Add an entry to its day and write the journal back, reporting failures
    ///
    /// Nothing is written unless the current journal could be read.
    pub fn try_append(&self, entry: MoodEntry) -> Result<(), StorageError> {
        let all = self.try_load()?;
        self.write_with(all, entry)
    }

    /// Add an entry and write the journal back; failures are logged only
    ///
    /// The current journal is read with `load`, so an unreadable slot is
    /// replaced by a journal holding only this entry. There is no retry and
    /// no confirmation. Check `last_failure` to find out whether the read
    /// degraded or the write was dropped.
    pub fn append(&self, entry: MoodEntry) {
        let all = self.load();
        match self.write_with(all, entry) {
            Ok(()) => self.clear_failure(StoreOperation::Append),
            Err(e) => {
                error!("Error saving journal to storage: {}", e);
                self.record_failure(StoreOperation::Append, &e);
            }
        }
    }

    fn write_with(&self, mut all: DayEntries, mut entry: MoodEntry) -> Result<(), StorageError> {
        entry.note = truncate_note(&entry.note);
        let (id, date) = (entry.id.clone(), entry.date);
        all.insert(entry);

        let raw = serde_json::to_string(&all)?;
        self.backend.set(&self.key, &raw)?;

        debug!("Saved entry {} for {} ({} entries that day)", id, date, all.for_date(date).len());
        Ok(())
    }

    /// The most recent failure swallowed by `load` or `append`
    ///
    /// Cleared by the next successful call of the same operation. After an
    /// `append`, a `Load` failure means the write went over an unreadable
    /// journal.
    pub fn last_failure(&self) -> Option<StoreFailure> {
        self.last_failure.borrow().clone()
    }

    fn record_failure(&self, operation: StoreOperation, err: &StorageError) {
        *self.last_failure.borrow_mut() = Some(StoreFailure {
            operation,
            message: err.to_string(),
        });
    }

    fn clear_failure(&self, operation: StoreOperation) {
        let mut slot = self.last_failure.borrow_mut();
        if slot.as_ref().map(|f| f.operation) == Some(operation) {
            *slot = None;
        }
    }
}
