/// Basic unit tests to verify core functionality through the public API
use mood_journal_mcp::*;
use chrono::NaiveDate;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(id: &str, day: &str, mood: MoodValue, created_at: i64) -> MoodEntry {
        MoodEntry {
            id: EntryId(id.to_string()),
            date: date(day),
            mood,
            tags: vec![],
            note: String::new(),
            created_at,
        }
    }

    #[test]
    fn test_mood_entry_creation() {
        let draft = NewMoodEntry::new(date("2024-07-30"), MoodValue::Happy)
            .with_tags(vec![Tag::Grateful])
            .with_note("A good day!");
        let entry = MoodEntry::create(draft);

        assert_eq!(entry.mood, MoodValue::Happy);
        assert_eq!(entry.note, "A good day!");
        assert!(!entry.id.as_str().is_empty());
    }

    #[test]
    fn test_average_examples() {
        let engine = AggregationEngine::new();
        let avg = |moods: &[MoodValue]| {
            let entries: Vec<MoodEntry> = moods
                .iter()
                .enumerate()
                .map(|(i, m)| entry(&i.to_string(), "2024-07-01", *m, i as i64))
                .collect();
            engine.average(&entries)
        };

        let no_moods: [MoodValue; 0] = [];
        assert_eq!(avg(&no_moods), None);
        assert_eq!(avg(&[MoodValue::Happy]), Some(MoodValue::Happy));
        assert_eq!(avg(&[MoodValue::VeryHappy, MoodValue::Neutral]), Some(MoodValue::Happy));
        assert_eq!(avg(&[MoodValue::Happy, MoodValue::Neutral]), Some(MoodValue::Happy));
        assert_eq!(
            avg(&[MoodValue::Neutral, MoodValue::Neutral, MoodValue::Happy]),
            Some(MoodValue::Neutral)
        );
    }

    #[test]
    fn test_july_average_excludes_other_months() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        repo.store().append(entry("a", "2024-07-05", MoodValue::VeryHappy, 1));
        repo.store().append(entry("b", "2024-06-20", MoodValue::Sad, 2));
        repo.store().append(entry("c", "2023-07-10", MoodValue::Sad, 3));
        repo.store().append(entry("d", "2024-07-25", MoodValue::Happy, 4));

        let all = repo.all_entries_flat();
        let engine = AggregationEngine::new();
        assert_eq!(engine.monthly_average(&all, 2024, 7), Some(MoodValue::VeryHappy));
    }

    #[test]
    fn test_read_fault_yields_empty_journal() {
        let store = EntryStore::new(MemoryBackend::new());
        store.append(entry("a", "2024-07-30", MoodValue::Happy, 1));

        store.backend().fail_next_read();
        let loaded = store.load();

        assert!(loaded.is_empty());
        assert_eq!(store.last_failure().unwrap().operation, StoreOperation::Load);
    }

    #[test]
    fn test_write_fault_returns_normally() {
        let store = EntryStore::new(MemoryBackend::new());
        store.backend().fail_writes(true);

        store.append(entry("a", "2024-07-30", MoodValue::Happy, 1));

        assert_eq!(store.last_failure().unwrap().operation, StoreOperation::Append);
        assert!(store.backend().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_long_note_truncated_on_append() {
        let store = EntryStore::new(MemoryBackend::new());
        let mut long = entry("a", "2024-07-30", MoodValue::Happy, 1);
        long.note = "é".repeat(200);
        store.append(long);

        let loaded = store.load();
        assert_eq!(loaded.for_date(date("2024-07-30"))[0].note.chars().count(), MAX_NOTE_CHARS);
    }

    #[test]
    fn test_unknown_date_is_empty() {
        let repo = EntryRepository::from_backend(MemoryBackend::new());
        assert!(repo.entries_for_date(date("2030-01-01")).is_empty());
    }
}
