/// MCP tools for mood journaling
///
/// This module contains all the MCP tools that external clients
/// can call to record moods and read back entries and averages.

pub mod average;
pub mod calendar;
pub mod day;
pub mod list;
pub mod log;

// Re-export tool functions for easy access
pub use average::*;
pub use calendar::*;
pub use day::*;
pub use list::*;
pub use log::*;

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::DomainError;

/// A tool response: structured data plus the text shown to the user
pub trait ToolOutput: Serialize {
    fn message(&self) -> &str;
}

macro_rules! impl_tool_output {
    ($($response:ty),* $(,)?) => {
        $(impl ToolOutput for $response {
            fn message(&self) -> &str {
                &self.message
            }
        })*
    };
}

impl_tool_output!(
    LogMoodResponse,
    DayResponse,
    ListEntriesResponse,
    AverageResponse,
    CalendarResponse,
);

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Resolve optional year/month arguments, defaulting to the current month
pub(crate) fn resolve_month(year: Option<i32>, month: Option<u32>) -> Result<(i32, u32), DomainError> {
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    if !(1..=12).contains(&month) {
        return Err(DomainError::InvalidMonth(month));
    }
    Ok((year, month))
}

/// "July 2024"
pub(crate) fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}
