//! Storage Module Tests
//!
//! Validates the participant store and its JSON snapshot.
//!
//! ## Test Scopes
//! - **Indexes**: Lookups by `p_no`, membership by either key, independence of the two key spaces.
//! - **Snapshot**: Round-trips through the durable file, tolerance of missing/corrupt files.
//! - **Failure**: A failed snapshot write keeps the in-memory mutation.

#[cfg(test)]
mod tests {
    use crate::storage::snapshot::{load_snapshot, write_snapshot};
    use crate::storage::store::{ParticipantStore, StoreError};
    use crate::storage::types::{Attendance, ParticipantRecord};
    use chrono::{TimeZone, Utc};

    fn record(p_no: &str, mobile_no: &str) -> ParticipantRecord {
        ParticipantRecord {
            p_no: p_no.to_string(),
            mobile_no: mobile_no.to_string(),
            name: format!("Participant {}", p_no),
            trade: "Welding".to_string(),
            gender: "M".to_string(),
            attendance_day1: Attendance::Present,
            attendance_day2: Attendance::Absent,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    // ============================================================
    // ATTENDANCE TESTS
    // ============================================================

    #[test]
    fn test_attendance_parse_accepts_case_and_whitespace() {
        assert_eq!(Attendance::parse("P"), Some(Attendance::Present));
        assert_eq!(Attendance::parse(" a "), Some(Attendance::Absent));
        assert_eq!(Attendance::parse("p\t"), Some(Attendance::Present));
    }

    #[test]
    fn test_attendance_parse_rejects_other_values() {
        assert_eq!(Attendance::parse(""), None);
        assert_eq!(Attendance::parse("Present"), None);
        assert_eq!(Attendance::parse("X"), None);
        assert_eq!(Attendance::parse("PA"), None);
    }

    #[test]
    fn test_record_serializes_with_letter_attendance() {
        let json = serde_json::to_value(record("P001", "9000000001")).unwrap();

        assert_eq!(json["p_no"], "P001");
        assert_eq!(json["mobile_no"], "9000000001");
        assert_eq!(json["attendance_day1"], "P");
        assert_eq!(json["attendance_day2"], "A");
        assert_eq!(json["created_at"], "2024-03-01T09:30:00Z");
    }

    // ============================================================
    // IN-MEMORY STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_append_preserves_insertion_order() {
        let mut store = ParticipantStore::in_memory();
        store
            .append(vec![record("P003", "1"), record("P001", "2")])
            .await
            .unwrap();
        store.append(vec![record("P002", "3")]).await.unwrap();

        let p_nos: Vec<&str> = store.all().iter().map(|r| r.p_no.as_str()).collect();
        assert_eq!(p_nos, vec!["P003", "P001", "P002"]);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_find_by_p_no_is_exact() {
        let mut store = ParticipantStore::in_memory();
        store.append(vec![record("P001", "9000000001")]).await.unwrap();

        assert_eq!(store.find_by_p_no("P001").unwrap().mobile_no, "9000000001");
        assert!(store.find_by_p_no("p001").is_none());
        assert!(store.find_by_p_no("P00").is_none());
        assert!(store.find_by_p_no("missing").is_none());
    }

    #[tokio::test]
    async fn test_exists_by_key_checks_both_key_spaces() {
        let mut store = ParticipantStore::in_memory();
        store.append(vec![record("P001", "9000000001")]).await.unwrap();

        assert!(store.exists_by_key("P001"));
        assert!(store.exists_by_key("9000000001"));
        assert!(!store.exists_by_key("P002"));
    }

    #[tokio::test]
    async fn test_key_spaces_are_independent() {
        let mut store = ParticipantStore::in_memory();
        store.append(vec![record("12345", "9000000001")]).await.unwrap();

        // A mobile number equal to an existing p_no is not a mobile collision
        assert!(!store.contains_mobile("12345"));
        assert!(!store.contains_p_no("9000000001"));
        assert!(store.contains_p_no("12345"));
        assert!(store.contains_mobile("9000000001"));
    }

    #[tokio::test]
    async fn test_empty_append_is_noop() {
        let mut store = ParticipantStore::in_memory();
        store.append(Vec::new()).await.unwrap();

        assert!(store.is_empty());
        assert!(store.snapshot_path().is_none());
    }

    // ============================================================
    // SNAPSHOT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_round_trip_through_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participants.json");

        let records: Vec<ParticipantRecord> = (0..5)
            .map(|i| record(&format!("P{:03}", i), &format!("90000000{:02}", i)))
            .collect();

        let mut store = ParticipantStore::open(&path).await;
        assert!(store.is_empty());
        store.append(records.clone()).await.unwrap();

        let reloaded = ParticipantStore::open(&path).await;
        assert_eq!(reloaded.all(), records.as_slice());
        assert!(reloaded.contains_p_no("P004"));
        assert!(reloaded.contains_mobile("9000000000"));
    }

    #[tokio::test]
    async fn test_snapshot_is_rewritten_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participants.json");

        let mut store = ParticipantStore::open(&path).await;
        store.append(vec![record("P001", "1")]).await.unwrap();
        store.append(vec![record("P002", "2")]).await.unwrap();

        let on_disk = load_snapshot(&path).await;
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk[0].p_no, "P001");
        assert_eq!(on_disk[1].p_no, "P002");
    }

    #[tokio::test]
    async fn test_snapshot_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("participants.json");

        write_snapshot(&path, &[record("P001", "1")]).await.unwrap();

        assert!(path.exists());
        assert_eq!(load_snapshot(&path).await.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participants.json");

        write_snapshot(&path, &[record("P001", "1")]).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["participants.json".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ParticipantStore::open(dir.path().join("absent.json")).await;

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participants.json");
        std::fs::write(&path, b"{ not json ]").unwrap();

        let store = ParticipantStore::open(&path).await;

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_mutation() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("participants.json");

        let mut store = ParticipantStore::open(&path).await;
        let result = store.append(vec![record("P001", "1")]).await;

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.len(), 1);
        assert!(store.contains_p_no("P001"));
    }
}
