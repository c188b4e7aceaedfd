/// MoodEntry entity for recorded moods
///
/// This module defines the MoodEntry struct that represents a single mood
/// observation on a specific day, and the NewMoodEntry draft a consumer
/// fills in before the id and creation time are stamped.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, MoodValue, Tag};

/// Maximum number of characters kept in a note
pub const MAX_NOTE_CHARS: usize = 120;

/// Last creation time handed out, so stamps never repeat within a process
static LAST_CREATED_AT: AtomicI64 = AtomicI64::new(0);

/// Current time in epoch millis, strictly greater than any earlier stamp
fn next_created_at() -> i64 {
    let now = Utc::now().timestamp_millis();
    let previous = LAST_CREATED_AT
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or_else(|last| last);
    now.max(previous + 1)
}

/// One recorded mood observation
///
/// Entries are immutable once created. The field names match the persisted
/// JSON layout, so `created_at` goes over the wire as `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which day this entry belongs to
    pub date: NaiveDate,
    /// The mood rating
    pub mood: MoodValue,
    /// Tags from the fixed vocabulary
    pub tags: Vec<Tag>,
    /// Free text, at most 120 characters once persisted
    pub note: String,
    /// Milliseconds since the Unix epoch; orders entries within a day
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// A mood entry as submitted by a consumer, before it has an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodEntry {
    pub date: NaiveDate,
    pub mood: MoodValue,
    pub tags: Vec<Tag>,
    pub note: String,
}

impl NewMoodEntry {
    pub fn new(date: NaiveDate, mood: MoodValue) -> Self {
        Self {
            date,
            mood,
            tags: Vec::new(),
            note: String::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

impl MoodEntry {
    /// Stamp a draft with a fresh id and the current time
    ///
    /// Entries created back to back in the same millisecond still get
    /// distinct, increasing `created_at` values.
    pub fn create(draft: NewMoodEntry) -> Self {
        Self {
            id: EntryId::generate(),
            date: draft.date,
            mood: draft.mood,
            tags: draft.tags,
            note: truncate_note(&draft.note),
            created_at: next_created_at(),
        }
    }

    /// Check if this entry has a non-blank note
    pub fn has_note(&self) -> bool {
        !self.note.trim().is_empty()
    }
}

/// Cut a note down to `MAX_NOTE_CHARS` characters
///
/// Counts chars, not bytes, so multi-byte text is never split mid-codepoint.
pub fn truncate_note(note: &str) -> String {
    match note.char_indices().nth(MAX_NOTE_CHARS) {
        Some((byte_idx, _)) => note[..byte_idx].to_string(),
        None => note.to_string(),
    }
}
