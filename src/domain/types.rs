/// Core types and enums used throughout the domain layer
///
/// This module defines the fundamental types like MoodValue, Tag and EntryId
/// that are used by MoodEntry, DayEntries and the aggregation layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a mood entry
///
/// Ids look like `id-1722340800000-3f9a1c2b7` - the creation time in
/// milliseconds followed by a random suffix. They are opaque to everything
/// except `generate`, and are stored as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a new entry ID
    ///
    /// Unique for the lifetime of the process with overwhelming probability.
    /// Not suitable for anything security related.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("id-{}-{}", millis, &suffix[..9]))
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mood rating from 1 (very sad) to 5 (very happy)
///
/// Serialized as the bare integer so the persisted blob reads
/// `"mood": 4`. Anything outside 1-5 fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MoodValue {
    VerySad = 1,
    Sad = 2,
    Neutral = 3,
    Happy = 4,
    VeryHappy = 5,
}

impl MoodValue {
    /// All mood values in ascending order, as shown on the gauge bar
    pub const ALL: [MoodValue; 5] = [
        MoodValue::VerySad,
        MoodValue::Sad,
        MoodValue::Neutral,
        MoodValue::Happy,
        MoodValue::VeryHappy,
    ];

    /// Numeric rating (1-5)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Emoji shown for this mood
    pub fn emoji(self) -> &'static str {
        match self {
            MoodValue::VerySad => "😞",
            MoodValue::Sad => "🙁",
            MoodValue::Neutral => "😐",
            MoodValue::Happy => "🙂",
            MoodValue::VeryHappy => "😄",
        }
    }

    /// Display color (hex) used for calendar dots and gauge blocks
    pub fn color(self) -> &'static str {
        match self {
            MoodValue::VerySad => "#FF6B6B",
            MoodValue::Sad => "#FFA07A",
            MoodValue::Neutral => "#FFD700",
            MoodValue::Happy => "#90EE90",
            MoodValue::VeryHappy => "#32CD32",
        }
    }

    /// Human readable label, e.g. "Very Happy"
    pub fn label(self) -> &'static str {
        match self {
            MoodValue::VerySad => "Very Sad",
            MoodValue::Sad => "Sad",
            MoodValue::Neutral => "Neutral",
            MoodValue::Happy => "Happy",
            MoodValue::VeryHappy => "Very Happy",
        }
    }
}

impl TryFrom<u8> for MoodValue {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MoodValue::VerySad),
            2 => Ok(MoodValue::Sad),
            3 => Ok(MoodValue::Neutral),
            4 => Ok(MoodValue::Happy),
            5 => Ok(MoodValue::VeryHappy),
            other => Err(DomainError::InvalidMood(other as i64)),
        }
    }
}

impl TryFrom<i64> for MoodValue {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| DomainError::InvalidMood(value))
            .and_then(MoodValue::try_from)
    }
}

impl From<MoodValue> for u8 {
    fn from(mood: MoodValue) -> Self {
        mood.value()
    }
}

impl fmt::Display for MoodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.emoji(), self.label(), self.value())
    }
}

/// Tags a user can attach to an entry
///
/// The vocabulary is fixed. Tags are stored lowercase in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Calm,
    Anxious,
    Excited,
    Tired,
    Focused,
    Creative,
    Stressed,
    Energetic,
    Grateful,
    Motivated,
}

impl Tag {
    /// Every tag in the vocabulary
    pub const ALL: [Tag; 10] = [
        Tag::Calm,
        Tag::Anxious,
        Tag::Excited,
        Tag::Tired,
        Tag::Focused,
        Tag::Creative,
        Tag::Stressed,
        Tag::Energetic,
        Tag::Grateful,
        Tag::Motivated,
    ];

    /// The lowercase name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Calm => "calm",
            Tag::Anxious => "anxious",
            Tag::Excited => "excited",
            Tag::Tired => "tired",
            Tag::Focused => "focused",
            Tag::Creative => "creative",
            Tag::Stressed => "stressed",
            Tag::Energetic => "energetic",
            Tag::Grateful => "grateful",
            Tag::Motivated => "motivated",
        }
    }
}

impl FromStr for Tag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownTag(s.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_value_range() {
        assert_eq!(MoodValue::try_from(1u8).unwrap(), MoodValue::VerySad);
        assert_eq!(MoodValue::try_from(5u8).unwrap(), MoodValue::VeryHappy);
        assert!(MoodValue::try_from(0u8).is_err());
        assert!(MoodValue::try_from(6u8).is_err());
        assert!(MoodValue::try_from(-1i64).is_err());
        assert!(MoodValue::try_from(300i64).is_err());
    }

    #[test]
    fn test_mood_value_serializes_as_integer() {
        let json = serde_json::to_string(&MoodValue::Happy).unwrap();
        assert_eq!(json, "4");

        let parsed: MoodValue = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, MoodValue::Sad);

        assert!(serde_json::from_str::<MoodValue>("9").is_err());
    }

    #[test]
    fn test_mood_presentation() {
        assert_eq!(MoodValue::VerySad.color(), "#FF6B6B");
        assert_eq!(MoodValue::VeryHappy.emoji(), "😄");
        assert_eq!(MoodValue::Neutral.label(), "Neutral");
        assert_eq!(MoodValue::Happy.to_string(), "🙂 Happy (4)");
    }

    #[test]
    fn test_tag_parsing() {
        assert_eq!("calm".parse::<Tag>().unwrap(), Tag::Calm);
        assert_eq!(" Grateful ".parse::<Tag>().unwrap(), Tag::Grateful);
        assert!("sleepy".parse::<Tag>().is_err());

        let json = serde_json::to_string(&vec![Tag::Tired, Tag::Focused]).unwrap();
        assert_eq!(json, r#"["tired","focused"]"#);
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = EntryId::generate();
        let b = EntryId::generate();

        assert_ne!(a, b);
        assert!(a.as_str().starts_with("id-"));
        // "id-" + millis + "-" + 9 char suffix
        let suffix = a.as_str().rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 9);
    }
}
