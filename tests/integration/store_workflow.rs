/// End-to-end store workflows over the in-memory backend
use chrono::NaiveDate;
use habit_store::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

async fn store_on(d: u32) -> HabitStore<MemoryKeyValueStore> {
    HabitStore::load(MemoryKeyValueStore::new()).await.with_fixed_today(day(d))
}

#[cfg(test)]
mod store_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_habit_cascades() {
        let mut store = store_on(10).await;
        let run = store.add_habit(HabitDraft::new("Run", "Health", 5.0, "km")).await.unwrap();
        let read = store.add_habit(HabitDraft::new("Read", "Learning", 20.0, "pages")).await.unwrap();
        store.mark_done(&run.id, day(10)).await.unwrap();
        store.mark_done(&read.id, day(10)).await.unwrap();

        assert!(store.delete_habit(&run.id).await);

        let state = store.state();
        assert!(state.habits.iter().all(|h| h.id != run.id));
        assert!(state.habit_entries.iter().all(|e| e.habit_id != run.id));
        assert!(state.streaks.iter().all(|s| s.habit_id != run.id));
        assert_eq!(state.habit_entries.len(), 1);
        assert!(!store.delete_habit(&run.id).await);
    }

    #[tokio::test]
    async fn test_export_then_import_restores_data() {
        let mut source = store_on(10).await;
        let habit = source
            .add_habit(HabitDraft::new("Journal", "Mindfulness", 1.0, "entry").description("Evening notes"))
            .await
            .unwrap();
        source
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(9), 1.0).notes("short"))
            .await
            .unwrap();
        source.mark_done(&habit.id, day(10)).await.unwrap();
        source.register("Kim", "kim@example.com").await.unwrap();

        let exported = source.export_data().unwrap();

        let mut target = store_on(10).await;
        target.import_data(&exported).await.unwrap();

        assert_eq!(target.habits(), source.habits());
        assert_eq!(target.state().habit_entries, source.state().habit_entries);
        assert_eq!(target.user(), source.user());
        assert_eq!(target.get_habit_streak(&habit.id).unwrap().current_streak, 2);
    }

    #[tokio::test]
    async fn test_rejected_import_leaves_state_unchanged() {
        let mut store = store_on(10).await;
        store.add_habit(HabitDraft::new("Run", "Health", 1.0, "")).await.unwrap();
        let before = store.state().clone();

        for payload in ["{}", r##"{"habits": "nope"}"##, "garbage"] {
            let err = store.import_data(payload).await.unwrap_err();
            assert!(matches!(err, StoreError::Import(_)));
        }
        assert_eq!(store.state(), &before);
    }

    #[tokio::test]
    async fn test_import_recomputes_streaks() {
        let text = r##"{
            "habits": [{
                "id": "h1", "name": "Walk", "category": "Health", "color": "#18A999",
                "icon": "directions_walk", "target": 1, "unit": "", "frequency": "daily",
                "isActive": true, "createdAt": "2024-05-01T08:00:00Z", "updatedAt": "2024-05-01T08:00:00Z"
            }],
            "habitEntries": [
                {"id": "e1", "habitId": "h1", "date": "2024-05-08", "value": 1, "completed": true, "timestamp": "2024-05-08T08:00:00Z"},
                {"id": "e2", "habitId": "h1", "date": "2024-05-09", "value": 1, "completed": true, "timestamp": "2024-05-09T08:00:00Z"}
            ],
            "streaks": [{"habitId": "h1", "currentStreak": 40, "longestStreak": 40}],
            "exportedAt": "2024-05-10T08:00:00Z",
            "version": "1.0.0"
        }"##;

        let mut store = store_on(10).await;
        store.import_data(text).await.unwrap();

        let streak = store.get_habit_streak(&HabitId::from("h1")).unwrap();
        assert_eq!(streak.current_streak, 2);
        assert_eq!(streak.longest_streak, 2);
        assert_eq!(streak.last_completed_date, Some(day(9)));
    }

    #[tokio::test]
    async fn test_weekly_summary_over_store() {
        let mut store = store_on(10).await;
        let run = store.add_habit(HabitDraft::new("Run", "Health", 1.0, "")).await.unwrap();
        for d in 4..=10 {
            store.mark_done(&run.id, day(d)).await.unwrap();
        }

        let summary = store.weekly_summary();
        assert_eq!(summary.total_completed, 7);
        assert_eq!(summary.completion_rate, 100);
        assert_eq!(summary.total_current_streak, 7);
        assert_eq!(store.completion_percentage(&run.id, day(10)), Some(100));
        assert_eq!(store.completion_percentage(&HabitId::new(), day(10)), None);
    }
}
