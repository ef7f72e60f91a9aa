/// Streak calculation and tracking functionality
///
/// This module defines the HabitStreak record and the pure calculator that
/// derives it from a habit's entries. Streaks are a cache: they can always be
/// rebuilt from the entries and are recomputed after every entry mutation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{HabitEntry, HabitId};

/// Calculated streak information for a habit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStreak {
    /// Which habit this streak data is for
    pub habit_id: HabitId,
    /// Consecutive completed days ending today or yesterday
    pub current_streak: u32,
    /// Best run of consecutive completed days ever achieved
    pub longest_streak: u32,
    /// Latest completed day (None if never completed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
    /// First day of the current run (None when the current streak is zero)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_start_date: Option<NaiveDate>,
}

impl HabitStreak {
    /// Create a streak record with zero values
    pub fn new(habit_id: HabitId) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            last_completed_date: None,
            streak_start_date: None,
        }
    }

    /// Calculate streak information from a habit's entries
    ///
    /// Only entries marked completed count, and several entries on the same
    /// day count once. The current run is anchored on `today` when today is
    /// completed, otherwise on yesterday; if neither is completed the current
    /// streak is zero. Completed days after `today` never extend the current
    /// run but do take part in the longest-run scan.
    pub fn calculate<'a, I>(habit_id: HabitId, entries: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a HabitEntry>,
    {
        let dates: BTreeSet<NaiveDate> = entries
            .into_iter()
            .filter(|e| e.completed)
            .map(|e| e.date)
            .collect();

        if dates.is_empty() {
            return Self::new(habit_id);
        }

        let (current_streak, streak_start_date) = Self::current_run(&dates, today);
        let longest_streak = Self::longest_run(&dates).max(current_streak);

        Self {
            habit_id,
            current_streak,
            longest_streak,
            last_completed_date: dates.last().copied(),
            streak_start_date,
        }
    }

    /// Whether the last completion is recent enough to keep a streak alive
    pub fn is_current(&self, today: NaiveDate) -> bool {
        match self.last_completed_date {
            Some(last) => {
                let days_since = (today - last).num_days();
                (0..=1).contains(&days_since)
            }
            None => false,
        }
    }

    /// A short message describing the streak
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current_streak),
            7..=29 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            _ => format!("Incredible! {} days of consistency.", self.current_streak),
        }
    }

    /// Walk backwards from the anchor day while days are completed
    fn current_run(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> (u32, Option<NaiveDate>) {
        let anchor = if dates.contains(&today) {
            Some(today)
        } else {
            today.pred_opt().filter(|yesterday| dates.contains(yesterday))
        };

        let Some(mut day) = anchor else {
            return (0, None);
        };

        let mut count = 0;
        let mut start = day;
        while dates.contains(&day) {
            count += 1;
            start = day;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }

        (count, Some(start))
    }

    /// Longest run of consecutive days in an ascending set
    fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
        let mut longest = 0;
        let mut run = 0;
        let mut prev: Option<NaiveDate> = None;

        for &date in dates {
            run = match prev {
                Some(p) if p.succ_opt() == Some(date) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            prev = Some(date);
        }

        longest
    }
}
