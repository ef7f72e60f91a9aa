/// SQLite-backed store tests
use chrono::NaiveDate;
use habit_store::*;
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[cfg(test)]
mod sqlite_persistence_tests {
    use super::*;

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("habits.db");

        let habit_id = {
            let kv = SqliteKeyValueStore::new(db_path.clone()).expect("Failed to open store");
            let mut store = HabitStore::load(kv).await.with_fixed_today(day(10));
            let habit = store
                .add_habit(HabitDraft::new("Meditate", "Mindfulness", 10.0, "min"))
                .await
                .unwrap();
            store.mark_done(&habit.id, day(9)).await.unwrap();
            store.mark_done(&habit.id, day(10)).await.unwrap();
            store.register("Ana", "ana@example.com").await.unwrap();
            store.set_theme(ThemePreference::Light).await;
            assert!(store.error().is_none());
            habit.id
        };

        let kv = SqliteKeyValueStore::new(db_path).expect("Failed to reopen store");
        let store = HabitStore::load(kv).await.with_fixed_today(day(10));

        assert!(store.error().is_none());
        assert_eq!(store.habit(&habit_id).unwrap().name, "Meditate");
        assert_eq!(store.get_habit_entries(&habit_id, None).len(), 2);
        assert_eq!(store.get_habit_streak(&habit_id).unwrap().current_streak, 2);
        assert_eq!(store.user().unwrap().email, "ana@example.com");
        assert_eq!(store.theme(), ThemePreference::Light);
    }

    #[tokio::test]
    async fn test_reset_removes_every_key() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let kv = SqliteKeyValueStore::new(dir.path().join("habits.db")).unwrap();
        let mut store = HabitStore::load(kv).await;

        store.add_habit(HabitDraft::new("Run", "Health", 1.0, "")).await.unwrap();
        store.set_theme(ThemePreference::Dark).await;
        assert_eq!(store.kv().len().unwrap(), 6);

        store.reset_data().await.unwrap();

        assert!(store.kv().is_empty().unwrap());
        assert!(store.habits().is_empty());
        assert!(store.state().streaks.is_empty());
        assert!(store.user().is_none());
        assert_eq!(store.theme(), ThemePreference::System);
    }

    #[tokio::test]
    async fn test_corrupt_row_reports_load_failure() {
        let kv = SqliteKeyValueStore::open_in_memory().unwrap();
        kv.set(keys::STREAKS, "not json").await.unwrap();

        let store = HabitStore::load(kv).await;
        assert_eq!(store.error(), Some("Failed to load data"));
        assert!(store.habits().is_empty());
    }
}
