/// In-memory application state and the commands that mutate it
///
/// Every change to the state goes through `AppState::apply`, which keeps the
/// mutations in one place and makes them easy to test without storage.

use crate::domain::{
    EntryId, Habit, HabitEntry, HabitId, HabitStreak, ThemePreference, User, UserAchievement,
};

/// The persisted data collections, as loaded from storage or an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    pub habit_entries: Vec<HabitEntry>,
    pub streaks: Vec<HabitStreak>,
    pub user: Option<User>,
    pub user_achievements: Vec<UserAchievement>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub habits: Vec<Habit>,
    pub habit_entries: Vec<HabitEntry>,
    /// One derived record per habit
    pub streaks: Vec<HabitStreak>,
    pub user: Option<User>,
    pub user_achievements: Vec<UserAchievement>,
    pub theme: ThemePreference,
    /// Last load/save failure, for display
    pub error: Option<String>,
}

/// A single state mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace all data collections and clear the error flag
    Load(Snapshot),
    AddHabit(Habit),
    /// Replace the habit with the same id
    UpdateHabit(Habit),
    /// Remove a habit with its entries and streak
    DeleteHabit(HabitId),
    AddEntry(HabitEntry),
    /// Replace the entry with the same id
    UpdateEntry(HabitEntry),
    DeleteEntry(EntryId),
    /// Insert or replace the streak for its habit
    UpdateStreak(HabitStreak),
    SetUser(Option<User>),
    SetTheme(ThemePreference),
    SetError(Option<String>),
    /// Back to empty defaults
    Reset,
}

impl AppState {
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Load(snapshot) => {
                self.habits = snapshot.habits;
                self.habit_entries = snapshot.habit_entries;
                self.streaks = snapshot.streaks;
                self.user = snapshot.user;
                self.user_achievements = snapshot.user_achievements;
                self.error = None;
            }
            Command::AddHabit(habit) => self.habits.push(habit),
            Command::UpdateHabit(habit) => {
                if let Some(existing) = self.habits.iter_mut().find(|h| h.id == habit.id) {
                    *existing = habit;
                }
            }
            Command::DeleteHabit(habit_id) => {
                self.habits.retain(|h| h.id != habit_id);
                self.habit_entries.retain(|e| e.habit_id != habit_id);
                self.streaks.retain(|s| s.habit_id != habit_id);
            }
            Command::AddEntry(entry) => self.habit_entries.push(entry),
            Command::UpdateEntry(entry) => {
                if let Some(existing) = self.habit_entries.iter_mut().find(|e| e.id == entry.id) {
                    *existing = entry;
                }
            }
            Command::DeleteEntry(entry_id) => {
                self.habit_entries.retain(|e| e.id != entry_id);
            }
            Command::UpdateStreak(streak) => {
                match self.streaks.iter_mut().find(|s| s.habit_id == streak.habit_id) {
                    Some(existing) => *existing = streak,
                    None => self.streaks.push(streak),
                }
            }
            Command::SetUser(user) => self.user = user,
            Command::SetTheme(theme) => self.theme = theme,
            Command::SetError(error) => self.error = error,
            Command::Reset => *self = AppState::default(),
        }
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == habit_id)
    }

    pub fn entry(&self, entry_id: &EntryId) -> Option<&HabitEntry> {
        self.habit_entries.iter().find(|e| &e.id == entry_id)
    }

    pub fn streak(&self, habit_id: &HabitId) -> Option<&HabitStreak> {
        self.streaks.iter().find(|s| &s.habit_id == habit_id)
    }

    /// All entries belonging to a habit, in insertion order
    pub fn entries_for<'a>(&'a self, habit_id: &HabitId) -> impl Iterator<Item = &'a HabitEntry> + 'a {
        let habit_id = habit_id.clone();
        self.habit_entries.iter().filter(move |e| e.habit_id == habit_id)
    }
}
