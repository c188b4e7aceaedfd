/// Tool for the calendar month view
///
/// This module implements the mood_calendar MCP tool: which days of a
/// month have entries and what color each day's average maps to.

use serde::{Deserialize, Serialize};

use crate::analytics::{AggregationEngine, MonthSummary};
use crate::domain::DomainError;
use crate::repository::EntryRepository;
use crate::storage::KeyValueBackend;
use crate::tools::{month_label, resolve_month};

/// Parameters for the calendar view
#[derive(Debug, Default, Deserialize)]
pub struct CalendarParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Response with one month's summary
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub summary: MonthSummary,
    pub message: String,
}

/// Build the calendar summary for a month, defaulting to the current one
pub fn get_calendar<B: KeyValueBackend>(
    repo: &EntryRepository<B>,
    engine: &AggregationEngine,
    params: CalendarParams,
) -> Result<CalendarResponse, DomainError> {
    let (year, month) = resolve_month(params.year, params.month)?;
    let summary = engine.calendar_month(&repo.all_entries(), year, month)?;

    let title = format!("🗓️ {}", month_label(year, month));
    let message = if summary.days.is_empty() {
        format!("{}\nNo mood data for this month.", title)
    } else {
        let days = summary
            .days
            .iter()
            .map(|d| {
                format!(
                    "{} {} {} ({} entr{})",
                    d.date,
                    d.emoji,
                    d.color,
                    d.entry_count,
                    if d.entry_count == 1 { "y" } else { "ies" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let average = summary
            .average
            .map(|a| a.to_string())
            .unwrap_or_else(|| "no data".to_string());
        format!("{}\n{}\n\nMonth average: {}", title, days, average)
    };

    Ok(CalendarResponse { summary, message })
}
