/// Tool for listing entries
///
/// This module implements the mood_list MCP tool.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, MoodEntry};
use crate::repository::EntryRepository;
use crate::storage::KeyValueBackend;

/// Parameters for listing entries
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesParams {
    pub limit: Option<usize>,
}

/// Response from listing entries
#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    /// Most recent first
    pub entries: Vec<MoodEntry>,
    /// Number of entries in the journal, before any limit
    pub total: usize,
    pub message: String,
}

/// List journal entries, most recently created first
pub fn list_entries<B: KeyValueBackend>(
    repo: &EntryRepository<B>,
    params: ListEntriesParams,
) -> Result<ListEntriesResponse, DomainError> {
    let mut entries = repo.all_entries_flat();
    let total = entries.len();

    if let Some(limit) = params.limit {
        if limit == 0 {
            return Err(DomainError::Validation {
                message: "limit must be at least 1".to_string(),
            });
        }
        entries.truncate(limit);
    }

    let message = if entries.is_empty() {
        "No mood entries yet. Log your first mood to get started!".to_string()
    } else {
        let lines = entries
            .iter()
            .map(|e| format!("{} {} {}", e.date, e.mood.emoji(), e.mood.label()))
            .collect::<Vec<_>>()
            .join("\n");
        format!("📋 Showing {} of {} entries\n\n{}", entries.len(), total, lines)
    };

    Ok(ListEntriesResponse {
        entries,
        total,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryId, MoodValue};
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;

    fn entry(id: &str, day: u32, created_at: i64) -> MoodEntry {
        MoodEntry {
            id: EntryId(id.to_string()),
            date: NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
            mood: MoodValue::Neutral,
            tags: vec![],
            note: String::new(),
            created_at,
        }
    }

    #[test]
    fn test_list_entries_with_limit() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        repo.store().append(entry("a", 1, 100));
        repo.store().append(entry("b", 2, 200));
        repo.store().append(entry("c", 2, 300));

        let response = list_entries(&repo, ListEntriesParams { limit: Some(2) }).unwrap();

        assert_eq!(response.total, 3);
        let ids: Vec<&str> = response.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_list_empty_journal() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        let response = list_entries(&repo, ListEntriesParams::default()).unwrap();

        assert_eq!(response.total, 0);
        assert!(response.message.starts_with("No mood entries yet"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        assert!(list_entries(&repo, ListEntriesParams { limit: Some(0) }).is_err());
    }
}
