/// Tool for logging a mood
///
/// This module implements the mood_log MCP tool.

use serde::{Deserialize, Serialize};
use chrono::Utc;

use crate::domain::{DomainError, MoodValue, NewMoodEntry, Tag, MAX_NOTE_CHARS};
use crate::repository::EntryRepository;
use crate::storage::{KeyValueBackend, StoreOperation};
use crate::tools::parse_date;

/// Parameters for logging a mood
#[derive(Debug, Deserialize)]
pub struct LogMoodParams {
    pub date: Option<String>, // Optional date, defaults to today
    pub mood: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub note: Option<String>,
}

/// Response from logging a mood
#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub success: bool,
    /// False when the store dropped the write, or wrote over a journal
    /// it could not read
    pub saved: bool,
    pub entry_id: String,
    pub date: String,
    pub mood: MoodValue,
    pub message: String,
}

/// Validate the params and append a new entry
pub fn log_mood<B: KeyValueBackend>(
    repo: &EntryRepository<B>,
    params: LogMoodParams,
) -> Result<LogMoodResponse, DomainError> {
    let date = match params.date.as_deref() {
        Some(raw) if !raw.trim().is_empty() => parse_date(raw)?,
        _ => Utc::now().date_naive(),
    };

    let mood = MoodValue::try_from(params.mood)?;

    let tags = params
        .tags
        .iter()
        .map(|t| t.parse::<Tag>())
        .collect::<Result<Vec<_>, _>>()?;

    let note = params.note.unwrap_or_default();
    let truncated = note.chars().count() > MAX_NOTE_CHARS;

    let entry = repo.add_entry(NewMoodEntry::new(date, mood).with_tags(tags).with_note(note));

    // append clears stale failures on success, so anything left is from this call
    let failure = repo.last_failure();

    let message = match &failure {
        Some(f) if f.operation == StoreOperation::Load => format!(
            "⚠️ Logged {} for {}, but earlier entries could not be read and may be lost: {}",
            mood, date, f.message
        ),
        Some(f) => format!(
            "⚠️ Logged {} for {}, but it may not have been saved: {}",
            mood, date, f.message
        ),
        None if truncated => format!(
            "{} Logged {} for {} (note shortened to {} characters)",
            mood.emoji(), mood.label(), date, MAX_NOTE_CHARS
        ),
        None => format!("{} Logged {} for {}", mood.emoji(), mood.label(), date),
    };

    Ok(LogMoodResponse {
        success: true,
        saved: failure.is_none(),
        entry_id: entry.id.to_string(),
        date: date.to_string(),
        mood,
        message,
    })
}
