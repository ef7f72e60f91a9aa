/// Statistics over habits and their entries
///
/// These are read-only views used by dashboards and the calendar: per-day
/// progress, a rolling weekly summary and calendar week layout.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::domain::{Habit, HabitEntry, HabitId, HabitStreak};

/// Number of habits listed in a weekly summary
const TOP_HABITS: usize = 3;

/// Completed-entry count for one habit within a summary window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletionCount {
    pub habit_id: HabitId,
    pub name: String,
    pub completed_count: usize,
}

/// Activity over the seven days ending today
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_completed: usize,
    pub active_habits: usize,
    /// Percentage of possible completions, 0-100
    pub completion_rate: u32,
    pub top_habits: Vec<HabitCompletionCount>,
    pub total_current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct AnalyticsEngine {
    week_starts_on: Weekday,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEngine {
    /// Weeks start on Monday
    pub fn new() -> Self {
        Self {
            week_starts_on: Weekday::Mon,
        }
    }

    /// `0` starts weeks on Sunday; anything else on Monday
    pub fn with_week_start(week_starts_on: u8) -> Self {
        let week_starts_on = if week_starts_on == 0 { Weekday::Sun } else { Weekday::Mon };
        Self { week_starts_on }
    }

    /// Progress toward the habit's target on `date`, capped at 100
    pub fn completion_percentage(&self, habit: &Habit, entries: &[HabitEntry], date: NaiveDate) -> u32 {
        let total: f64 = entries
            .iter()
            .filter(|e| e.habit_id == habit.id && e.date == date)
            .map(|e| e.value)
            .sum();
        percentage(total, habit.target)
    }

    /// Completed value on `date` over the sum of every habit's target,
    /// capped at 100
    pub fn daily_completion_rate(&self, habits: &[Habit], entries: &[HabitEntry], date: NaiveDate) -> u32 {
        if habits.is_empty() {
            return 0;
        }

        let target: f64 = habits.iter().map(|h| h.target).sum();
        let completed: f64 = entries
            .iter()
            .filter(|e| e.completed && e.date == date)
            .map(|e| e.value)
            .sum();
        percentage(completed, target)
    }

    /// Number of completed entries on `date`
    pub fn completions_on(&self, entries: &[HabitEntry], date: NaiveDate) -> usize {
        entries.iter().filter(|e| e.completed && e.date == date).count()
    }

    /// Summarize the window `[today - 6, today]`
    pub fn weekly_summary(
        &self,
        habits: &[Habit],
        entries: &[HabitEntry],
        streaks: &[HabitStreak],
        today: NaiveDate,
    ) -> WeeklySummary {
        let start = today - Duration::days(6);
        let in_window: Vec<&HabitEntry> = entries
            .iter()
            .filter(|e| e.completed && e.date >= start && e.date <= today)
            .collect();

        let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active).collect();

        let completion_rate = if active.is_empty() {
            0
        } else {
            percentage(in_window.len() as f64, (active.len() * 7) as f64)
        };

        let mut top_habits: Vec<HabitCompletionCount> = active
            .iter()
            .map(|h| HabitCompletionCount {
                habit_id: h.id.clone(),
                name: h.name.clone(),
                completed_count: in_window.iter().filter(|e| e.habit_id == h.id).count(),
            })
            .collect();
        // Stable sort keeps habit order among ties
        top_habits.sort_by(|a, b| b.completed_count.cmp(&a.completed_count));
        top_habits.truncate(TOP_HABITS);

        WeeklySummary {
            total_completed: in_window.len(),
            active_habits: active.len(),
            completion_rate,
            top_habits,
            total_current_streak: streaks.iter().map(|s| s.current_streak).sum(),
            longest_streak: streaks.iter().map(|s| s.longest_streak).max().unwrap_or(0),
        }
    }

    /// The seven dates of the calendar week containing `date`
    pub fn week_days(&self, date: NaiveDate) -> Vec<NaiveDate> {
        let offset = match self.week_starts_on {
            Weekday::Sun => date.weekday().num_days_from_sunday(),
            _ => date.weekday().num_days_from_monday(),
        };
        let start = date - Duration::days(i64::from(offset));
        (0..7).map(|i| start + Duration::days(i)).collect()
    }
}

fn percentage(value: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    ((value / total) * 100.0).round().clamp(0.0, 100.0) as u32
}
