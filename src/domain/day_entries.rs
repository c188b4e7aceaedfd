/// DayEntries - every mood entry, grouped by day
///
/// This is the whole persisted state of the journal. It is read and written
/// as one JSON object keyed by `YYYY-MM-DD`.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::MoodEntry;

/// Map from calendar date to that day's entries
///
/// Each day's list is kept in ascending `created_at` order after every
/// insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayEntries(BTreeMap<NaiveDate, Vec<MoodEntry>>);

impl DayEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to its day and re-sort that day by creation time
    ///
    /// The sort is stable, so entries created in the same millisecond keep
    /// the order they were inserted in.
    pub fn insert(&mut self, entry: MoodEntry) {
        let day = self.0.entry(entry.date).or_default();
        day.push(entry);
        day.sort_by_key(|e| e.created_at);
    }

    /// Entries recorded for `date`, oldest first
    pub fn for_date(&self, date: NaiveDate) -> &[MoodEntry] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every entry as one list, most recently created first
    pub fn flatten_recent_first(&self) -> Vec<MoodEntry> {
        let mut all: Vec<MoodEntry> = self.0.values().flatten().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Entries whose date falls in the given calendar month
    pub fn in_month(&self, year: i32, month: u32) -> Vec<&MoodEntry> {
        self.0
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .flat_map(|(_, entries)| entries.iter())
            .collect()
    }

    /// Iterate days in date order
    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<MoodEntry>)> {
        self.0.iter()
    }

    /// Total number of entries across all days
    pub fn entry_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Number of days with at least one entry
    pub fn day_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
