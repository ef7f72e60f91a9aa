/// Export envelope and import validation
use habit_store::*;

#[cfg(test)]
mod transfer_unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_envelope_fields() {
        let store = HabitStore::load(MemoryKeyValueStore::new()).await;
        let exported = store.export_data().unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();

        for field in ["habits", "habitEntries", "streaks", "userAchievements"] {
            assert!(value[field].is_array(), "{} should be an array", field);
        }
        assert_eq!(value["version"], EXPORT_VERSION);
        assert!(value["exportedAt"].is_string());
    }

    #[tokio::test]
    async fn test_import_rejects_bad_entry_value() {
        let text = r##"{"habits": [], "habitEntries": [{
            "id": "e1", "habitId": "h1", "date": "2024-05-10", "value": -3,
            "completed": true, "timestamp": "2024-05-10T08:00:00Z"
        }]}"##;

        let mut store = HabitStore::load(MemoryKeyValueStore::new()).await;
        let err = store.import_data(text).await.unwrap_err();
        assert!(matches!(err, StoreError::Import(ImportError::Invalid(_))));
        assert!(store.state().habit_entries.is_empty());
    }

    #[tokio::test]
    async fn test_import_keeps_orphan_entries() {
        let text = r##"{"habits": [], "habitEntries": [{
            "id": "e1", "habitId": "gone", "date": "2024-05-10", "value": 1,
            "completed": true, "timestamp": "2024-05-10T08:00:00Z"
        }]}"##;

        let mut store = HabitStore::load(MemoryKeyValueStore::new()).await;
        store.import_data(text).await.unwrap();
        assert_eq!(store.state().habit_entries.len(), 1);
        assert!(store.state().streaks.is_empty());
    }

    #[test]
    fn test_categories_are_listed() {
        let names: Vec<&str> = HabitCategory::defaults().iter().map(|c| c.name).collect();
        assert_eq!(names, ["Health", "Learning", "Productivity", "Mindfulness", "Social", "Creativity"]);
        assert_eq!(HabitCategory::find("health").unwrap().color, "#18A999");
    }
}
