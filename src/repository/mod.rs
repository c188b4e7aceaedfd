/// Entry repository - read-side views over the entry store
///
/// Nothing is cached: every query re-reads the store, so results always
/// reflect the latest persisted journal.

use chrono::NaiveDate;

use crate::domain::{DayEntries, EntryId, MoodEntry, NewMoodEntry};
use crate::storage::{EntryStore, KeyValueBackend, StoreFailure};

/// Query and append operations used by the tools
pub struct EntryRepository<B: KeyValueBackend> {
    store: EntryStore<B>,
}

impl<B: KeyValueBackend> EntryRepository<B> {
    pub fn new(store: EntryStore<B>) -> Self {
        Self { store }
    }

    /// Build a repository straight from a backend with the default key
    pub fn from_backend(backend: B) -> Self {
        Self::new(EntryStore::new(backend))
    }

    /// The underlying store
    pub fn store(&self) -> &EntryStore<B> {
        &self.store
    }

    /// The whole journal, grouped by day
    pub fn all_entries(&self) -> DayEntries {
        self.store.load()
    }

    /// Entries for one day, oldest first; empty if the day has none
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<MoodEntry> {
        self.store.load().for_date(date).to_vec()
    }

    /// Every entry as one list, most recently created first
    pub fn all_entries_flat(&self) -> Vec<MoodEntry> {
        self.store.load().flatten_recent_first()
    }

    /// A fresh entry id
    pub fn generate_id(&self) -> String {
        EntryId::generate().0
    }

    /// Stamp a draft with an id and creation time and append it
    ///
    /// Fire-and-forget: the returned entry is what was handed to the store,
    /// whether or not the write stuck. See `last_failure`.
    pub fn add_entry(&self, draft: NewMoodEntry) -> MoodEntry {
        let entry = MoodEntry::create(draft);
        self.store.append(entry.clone());
        entry
    }

    /// The most recent failure the store swallowed
    pub fn last_failure(&self) -> Option<StoreFailure> {
        self.store.last_failure()
    }
}
