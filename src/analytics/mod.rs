/// Aggregation engine for mood averages
///
/// This module reduces a set of entries to one representative mood. It is
/// scope agnostic: callers decide which entries count (one day, one month)
/// and the engine only averages what it is given.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{DayEntries, DomainError, MoodEntry, MoodValue};

/// One calendar day that has entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub average: MoodValue,
    pub color: &'static str,
    pub emoji: &'static str,
    pub entry_count: usize,
}

/// Per-day averages for one month plus the month's overall average
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    /// `None` when the month has no entries
    pub average: Option<MoodValue>,
    pub total_entries: usize,
    /// Only days with at least one entry, in date order
    pub days: Vec<DaySummary>,
}

/// Computes representative moods from entries
#[derive(Debug, Default, Clone, Copy)]
pub struct AggregationEngine;

impl AggregationEngine {
    /// Create a new aggregation engine
    pub fn new() -> Self {
        Self
    }

    /// Rounded mean mood of `entries`, or `None` when there are none
    ///
    /// Rounds half up, so a mean of 3.5 becomes 4. A result outside 1-5
    /// falls back to Neutral.
    pub fn average<'a, I>(&self, entries: I) -> Option<MoodValue>
    where
        I: IntoIterator<Item = &'a MoodEntry>,
    {
        let (sum, count) = entries
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), e| (sum + e.mood.value() as u64, count + 1));

        if count == 0 {
            return None;
        }

        // floor(sum / count + 1/2) without leaving integers
        let rounded = (2 * sum + count) / (2 * count);

        match MoodValue::try_from(rounded as i64) {
            Ok(mood) => Some(mood),
            Err(_) => {
                tracing::warn!("Average mood {} out of range, using neutral", rounded);
                Some(MoodValue::Neutral)
            }
        }
    }

    /// Average of the entries recorded on `date`
    pub fn daily_average(&self, entries: &[MoodEntry], date: NaiveDate) -> Option<MoodValue> {
        self.average(entries.iter().filter(|e| e.date == date))
    }

    /// Average of the entries in the given month of the given year
    pub fn monthly_average(&self, entries: &[MoodEntry], year: i32, month: u32) -> Option<MoodValue> {
        self.average(
            entries
                .iter()
                .filter(|e| e.date.year() == year && e.date.month() == month),
        )
    }

    /// Calendar view of one month: each day's average and the monthly average
    pub fn calendar_month(
        &self,
        days: &DayEntries,
        year: i32,
        month: u32,
    ) -> Result<MonthSummary, DomainError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(DomainError::InvalidMonth(month));
        }

        let month_entries = days.in_month(year, month);

        let day_summaries = days
            .days()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .filter_map(|(date, entries)| {
                self.average(entries.iter()).map(|average| DaySummary {
                    date: *date,
                    average,
                    color: average.color(),
                    emoji: average.emoji(),
                    entry_count: entries.len(),
                })
            })
            .collect();

        Ok(MonthSummary {
            year,
            month,
            average: self.average(month_entries.iter().copied()),
            total_entries: month_entries.len(),
            days: day_summaries,
        })
    }
}
