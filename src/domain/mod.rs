/// Domain module containing the core data model
///
/// This module defines the core entities (MoodEntry, DayEntries) and the
/// value types they are built from (MoodValue, Tag, EntryId).

pub mod day_entries;
pub mod entry;
pub mod types;

// Re-export public types for easy access
pub use day_entries::*;
pub use entry::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid mood: {0} (must be between 1 and 5)")]
    InvalidMood(i64),

    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0} (must be between 1 and 12)")]
    InvalidMonth(u32),
}
