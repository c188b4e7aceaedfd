/// Basic integration tests against an on-disk SQLite journal
use mood_journal_mcp::*;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = MoodJournalServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        let repo = server.repository();
        let saved = repo.add_entry(
            NewMoodEntry::new(day("2024-07-30"), MoodValue::Happy).with_tags(vec![Tag::Focused]),
        );
        assert!(repo.last_failure().is_none());

        let entries = repo.entries_for_date(day("2024-07-30"));
        assert_eq!(entries, vec![saved]);
        assert_eq!(
            server.analytics().daily_average(&entries, day("2024-07-30")),
            Some(MoodValue::Happy)
        );
    }

    #[tokio::test]
    async fn test_journal_persists_across_servers() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let first = MoodJournalServer::new(db_path.clone())
            .await
            .expect("Failed to create first server");
        first
            .repository()
            .add_entry(NewMoodEntry::new(day("2024-07-05"), MoodValue::VeryHappy));
        first
            .repository()
            .add_entry(NewMoodEntry::new(day("2024-07-25"), MoodValue::Happy));
        drop(first);

        let second = MoodJournalServer::new(db_path)
            .await
            .expect("Failed to create second server");

        let all = second.repository().all_entries_flat();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at >= all[1].created_at);
        assert_eq!(
            second.analytics().monthly_average(&all, 2024, 7),
            Some(MoodValue::VeryHappy)
        );
    }

    #[test]
    fn test_persisted_blob_shape() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let backend = SqliteBackend::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        let repo = EntryRepository::from_backend(backend);

        repo.add_entry(
            NewMoodEntry::new(day("2024-07-30"), MoodValue::Sad)
                .with_tags(vec![Tag::Tired])
                .with_note("A tiring day"),
        );

        let raw = repo
            .store()
            .backend()
            .get(STORAGE_KEY)
            .expect("read slot")
            .expect("slot written");
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let stored = &json["2024-07-30"][0];

        assert_eq!(stored["date"], "2024-07-30");
        assert_eq!(stored["mood"], 2);
        assert_eq!(stored["tags"][0], "tired");
        assert_eq!(stored["note"], "A tiring day");
        assert!(stored["createdAt"].is_i64());
        assert!(stored["id"].as_str().unwrap().starts_with("id-"));
    }

    #[test]
    fn test_corrupt_database_slot_degrades_to_empty() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let backend = SqliteBackend::new(temp_file.path().to_path_buf())
            .expect("Failed to create storage");
        backend.set(STORAGE_KEY, "[1, 2, 3]").unwrap();

        let repo = EntryRepository::from_backend(backend);
        assert!(repo.all_entries().is_empty());
        assert!(repo.last_failure().is_some());

        // load is stable without intervening writes
        assert_eq!(repo.all_entries(), repo.all_entries());
    }
}
