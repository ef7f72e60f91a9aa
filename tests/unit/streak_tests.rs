/// Streak calculation through the public API
use chrono::NaiveDate;
use habit_store::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entries(habit_id: &HabitId, days: &[NaiveDate]) -> Vec<HabitEntry> {
    days.iter()
        .map(|d| HabitEntry::new(EntryDraft::completed(habit_id.clone(), *d, 1.0)).unwrap())
        .collect()
}

#[cfg(test)]
mod streak_unit_tests {
    use super::*;

    #[test]
    fn test_streak_anchored_on_yesterday() {
        let habit_id = HabitId::new();
        let days = entries(&habit_id, &[date(2024, 5, 7), date(2024, 5, 8), date(2024, 5, 9)]);

        let streak = HabitStreak::calculate(habit_id.clone(), &days, date(2024, 5, 10));
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.streak_start_date, Some(date(2024, 5, 7)));
        assert!(streak.is_current(date(2024, 5, 10)));
    }

    #[test]
    fn test_gap_breaks_current_but_keeps_longest() {
        let habit_id = HabitId::new();
        let days = entries(
            &habit_id,
            &[date(2024, 5, 1), date(2024, 5, 2), date(2024, 5, 3), date(2024, 5, 4), date(2024, 5, 10)],
        );

        let streak = HabitStreak::calculate(habit_id, &days, date(2024, 5, 10));
        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.longest_streak, 4);
        assert_eq!(streak.last_completed_date, Some(date(2024, 5, 10)));
    }

    #[test]
    fn test_stale_streak_is_zero() {
        let habit_id = HabitId::new();
        let days = entries(&habit_id, &[date(2024, 2, 28), date(2024, 2, 29)]);

        let streak = HabitStreak::calculate(habit_id, &days, date(2024, 3, 5));
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 2);
        assert!(streak.streak_start_date.is_none());
        assert!(!streak.is_current(date(2024, 3, 5)));
    }

    #[test]
    fn test_streak_serializes_camel_case() {
        let streak = HabitStreak::new(HabitId::from("h1"));
        let value = serde_json::to_value(&streak).unwrap();
        assert_eq!(value["habitId"], "h1");
        assert_eq!(value["currentStreak"], 0);
        assert!(value.get("lastCompletedDate").is_none());
    }
}
