/// Tool for the monthly average mood
///
/// This module implements the mood_average MCP tool that backs the
/// "average mood this month" gauge.

use serde::{Deserialize, Serialize};

use crate::analytics::AggregationEngine;
use crate::domain::{DomainError, MoodValue};
use crate::repository::EntryRepository;
use crate::storage::KeyValueBackend;
use crate::tools::{month_label, resolve_month};

/// Parameters for the monthly average
#[derive(Debug, Default, Deserialize)]
pub struct AverageParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Response carrying the monthly average
#[derive(Debug, Serialize)]
pub struct AverageResponse {
    pub year: i32,
    pub month: u32,
    /// `None` means no data, never a default mood
    pub average: Option<MoodValue>,
    pub entry_count: usize,
    pub message: String,
}

/// Average mood for a month, defaulting to the current one
pub fn get_monthly_average<B: KeyValueBackend>(
    repo: &EntryRepository<B>,
    engine: &AggregationEngine,
    params: AverageParams,
) -> Result<AverageResponse, DomainError> {
    let (year, month) = resolve_month(params.year, params.month)?;

    let all = repo.all_entries();
    let month_entries = all.in_month(year, month);
    let average = engine.average(month_entries.iter().copied());

    let message = match average {
        None => "No mood data for this month.".to_string(),
        Some(avg) => {
            let bar = MoodValue::ALL
                .iter()
                .map(|m| if *m == avg { "■" } else { "□" })
                .collect::<String>();
            format!(
                "{} Average for {}: {} ({})  {}",
                avg.emoji(),
                month_label(year, month),
                avg.label(),
                avg.value(),
                bar
            )
        }
    };

    Ok(AverageResponse {
        year,
        month,
        average,
        entry_count: month_entries.len(),
        message,
    })
}
