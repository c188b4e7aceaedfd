/// Tool for reading back one day
///
/// This module implements the mood_day MCP tool.

use serde::{Deserialize, Serialize};

use crate::analytics::AggregationEngine;
use crate::domain::{DomainError, MoodEntry, MoodValue};
use crate::repository::EntryRepository;
use crate::storage::KeyValueBackend;
use crate::tools::parse_date;

/// Parameters for reading a day
#[derive(Debug, Deserialize)]
pub struct DayParams {
    pub date: String,
}

/// Entries and average for one day
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    /// Oldest first
    pub entries: Vec<MoodEntry>,
    pub average: Option<MoodValue>,
    pub message: String,
}

/// Get the entries recorded on a date along with the day's average mood
pub fn get_day<B: KeyValueBackend>(
    repo: &EntryRepository<B>,
    engine: &AggregationEngine,
    params: DayParams,
) -> Result<DayResponse, DomainError> {
    let date = parse_date(&params.date)?;
    let entries = repo.entries_for_date(date);
    let average = engine.average(&entries);

    let message = match average {
        None => format!("No mood entries for {}.", date),
        Some(avg) => {
            let lines = entries
                .iter()
                .map(|e| {
                    let tags = e.tags.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
                    let mut line = format!("{} {}", e.mood.emoji(), e.mood.label());
                    if !tags.is_empty() {
                        line.push_str(&format!(" [{}]", tags));
                    }
                    if e.has_note() {
                        line.push_str(&format!(" - {}", e.note));
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n");

            format!(
                "📅 {} ({} entr{})\n{}\n\nDay average: {}",
                date,
                entries.len(),
                if entries.len() == 1 { "y" } else { "ies" },
                lines,
                avg
            )
        }
    };

    Ok(DayResponse {
        date: date.to_string(),
        entries,
        average,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMoodEntry, Tag};
    use crate::storage::MemoryBackend;
    use chrono::NaiveDate;

    #[test]
    fn test_get_day() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        let date = NaiveDate::from_ymd_opt(2024, 7, 30).unwrap();
        repo.add_entry(NewMoodEntry::new(date, MoodValue::VeryHappy).with_tags(vec![Tag::Excited]));
        repo.add_entry(NewMoodEntry::new(date, MoodValue::Sad).with_note("long meeting"));

        let response = get_day(&repo, &AggregationEngine::new(), DayParams { date: "2024-07-30".to_string() }).unwrap();

        assert_eq!(response.entries.len(), 2);
        assert!(response.entries[0].created_at <= response.entries[1].created_at);
        // (5 + 2) / 2 = 3.5
        assert_eq!(response.average, Some(MoodValue::Happy));
        assert!(response.message.contains("[excited]"));
        assert!(response.message.contains("long meeting"));
    }

    #[test]
    fn test_get_empty_day() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        let response = get_day(&repo, &AggregationEngine::new(), DayParams { date: "2024-08-01".to_string() }).unwrap();

        assert!(response.entries.is_empty());
        assert_eq!(response.average, None);
        assert!(response.message.starts_with("No mood entries"));
    }

    #[test]
    fn test_get_day_invalid_date() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        assert!(get_day(&repo, &AggregationEngine::new(), DayParams { date: "soon".to_string() }).is_err());
    }
}
