/// The habit store: owned application state plus its persistence
///
/// `HabitStore` owns every collection (habits, entries, streaks, user,
/// achievements) and funnels all changes through `Command`s. After each
/// mutation the affected streaks are recomputed and the full data set is
/// written back to the key-value store.
///
/// Storage failures are logged and recorded on the state's error flag rather
/// than returned; they are never retried. Operations on ids that do not exist
/// are silent no-ops.

mod persistence;
mod state;
mod transfer;

pub use state::{AppState, Command, Snapshot};
pub use transfer::{ImportError, EXPORT_VERSION};

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, error, info, warn};

use crate::analytics::{AnalyticsEngine, WeeklySummary};
use crate::domain::{
    EntryDraft, EntryId, EntryPatch, Habit, HabitCategory, HabitDraft, HabitEntry, HabitId,
    HabitPatch, HabitStreak, ProfilePatch, SettingsPatch, ThemePreference, User,
};
use crate::storage::KeyValueStore;
use crate::StoreError;

const LOAD_FAILED: &str = "Failed to load data";
const SAVE_FAILED: &str = "Failed to save data";

pub struct HabitStore<S> {
    kv: S,
    state: AppState,
    fixed_today: Option<NaiveDate>,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Load the store from `kv`
    ///
    /// A failed or corrupt load leaves the store empty with the error flag
    /// set. Streaks are refreshed against today's date after loading.
    pub async fn load(kv: S) -> Self {
        let mut store = Self {
            kv,
            state: AppState::default(),
            fixed_today: None,
        };

        match persistence::load_snapshot(&store.kv).await {
            Ok(snapshot) => {
                info!(
                    "Loaded {} habits and {} entries",
                    snapshot.habits.len(),
                    snapshot.habit_entries.len()
                );
                store.dispatch(Command::Load(snapshot));
                store.refresh_all_streaks();
            }
            Err(e) => {
                error!("Error loading data: {}", e);
                store.dispatch(Command::SetError(Some(LOAD_FAILED.to_string())));
            }
        }

        match persistence::load_theme(&store.kv).await {
            Ok(theme) => store.dispatch(Command::SetTheme(theme)),
            Err(e) => error!("Error loading theme: {}", e),
        }

        store
    }

    /// Use a fixed calendar day as "today" instead of the local clock
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self.refresh_all_streaks();
        self
    }

    /// The calendar day streaks are measured against
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    pub fn habit(&self, habit_id: &HabitId) -> Option<&Habit> {
        self.state.habit(habit_id)
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn theme(&self) -> ThemePreference {
        self.state.theme
    }

    /// Last load/save failure message, if any
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.dispatch(Command::SetError(None));
    }

    pub fn categories(&self) -> &'static [HabitCategory] {
        HabitCategory::defaults()
    }

    /// Access the underlying key-value store
    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    // Habits

    /// Create a habit with a zeroed streak record
    pub async fn add_habit(&mut self, draft: HabitDraft) -> Result<Habit, StoreError> {
        let habit = Habit::new(draft)?;
        info!("Adding habit '{}' ({})", habit.name, habit.id);

        self.dispatch(Command::AddHabit(habit.clone()));
        self.dispatch(Command::UpdateStreak(HabitStreak::new(habit.id.clone())));
        self.persist().await;

        Ok(habit)
    }

    /// Apply a patch to a habit; `Ok(None)` if the habit does not exist
    pub async fn update_habit(
        &mut self,
        habit_id: &HabitId,
        patch: HabitPatch,
    ) -> Result<Option<Habit>, StoreError> {
        let Some(mut habit) = self.state.habit(habit_id).cloned() else {
            debug!("update_habit: no habit {}", habit_id);
            return Ok(None);
        };

        habit.apply(patch)?;
        info!("Updated habit '{}' ({})", habit.name, habit.id);

        self.dispatch(Command::UpdateHabit(habit.clone()));
        self.persist().await;

        Ok(Some(habit))
    }

    /// Delete a habit together with its entries and streak
    ///
    /// Returns whether a habit was removed.
    pub async fn delete_habit(&mut self, habit_id: &HabitId) -> bool {
        if self.state.habit(habit_id).is_none() {
            debug!("delete_habit: no habit {}", habit_id);
            return false;
        }

        info!("Deleting habit {}", habit_id);
        self.dispatch(Command::DeleteHabit(habit_id.clone()));
        self.persist().await;
        true
    }

    // Entries

    /// Record an entry; `Ok(None)` if the habit does not exist
    pub async fn add_habit_entry(&mut self, draft: EntryDraft) -> Result<Option<HabitEntry>, StoreError> {
        if self.state.habit(&draft.habit_id).is_none() {
            warn!("add_habit_entry: no habit {}", draft.habit_id);
            return Ok(None);
        }

        let entry = HabitEntry::new(draft)?;
        debug!("Adding entry {} for habit {} on {}", entry.id, entry.habit_id, entry.date);

        self.dispatch(Command::AddEntry(entry.clone()));
        self.recompute_streak(&entry.habit_id);
        self.persist().await;

        Ok(Some(entry))
    }

    /// Apply a patch to an entry; `Ok(None)` if the entry does not exist
    pub async fn update_habit_entry(
        &mut self,
        entry_id: &EntryId,
        patch: EntryPatch,
    ) -> Result<Option<HabitEntry>, StoreError> {
        let Some(mut entry) = self.state.entry(entry_id).cloned() else {
            debug!("update_habit_entry: no entry {}", entry_id);
            return Ok(None);
        };

        entry.apply(patch)?;
        debug!("Updated entry {} for habit {}", entry.id, entry.habit_id);

        self.dispatch(Command::UpdateEntry(entry.clone()));
        self.recompute_streak(&entry.habit_id);
        self.persist().await;

        Ok(Some(entry))
    }

    /// Delete an entry; returns whether an entry was removed
    pub async fn delete_habit_entry(&mut self, entry_id: &EntryId) -> bool {
        let Some(habit_id) = self.state.entry(entry_id).map(|e| e.habit_id.clone()) else {
            debug!("delete_habit_entry: no entry {}", entry_id);
            return false;
        };

        debug!("Deleting entry {} of habit {}", entry_id, habit_id);
        self.dispatch(Command::DeleteEntry(entry_id.clone()));
        self.recompute_streak(&habit_id);
        self.persist().await;
        true
    }

    /// Toggle completion of a habit for `date`
    ///
    /// With no entry on that day a completed entry worth the full target is
    /// added. Otherwise a new entry flipping the most recent entry's state is
    /// appended. `None` if the habit does not exist.
    pub async fn mark_done(&mut self, habit_id: &HabitId, date: NaiveDate) -> Option<HabitEntry> {
        let habit = self.state.habit(habit_id)?;
        let target = habit.target;

        let completed = match self.get_habit_entries(habit_id, Some(date)).first() {
            Some(latest) => !latest.completed,
            None => true,
        };
        let draft = EntryDraft {
            habit_id: habit_id.clone(),
            date,
            value: if completed { target } else { 0.0 },
            completed,
            notes: None,
        };

        match self.add_habit_entry(draft).await {
            Ok(entry) => entry,
            Err(e) => {
                error!("mark_done: failed to record entry for {}: {}", habit_id, e);
                None
            }
        }
    }

    /// Entries for a habit, optionally for one day, newest first
    ///
    /// Entries sharing a timestamp are ordered latest-recorded first.
    pub fn get_habit_entries(&self, habit_id: &HabitId, date: Option<NaiveDate>) -> Vec<&HabitEntry> {
        let mut entries: Vec<(usize, &HabitEntry)> = self
            .state
            .entries_for(habit_id)
            .enumerate()
            .filter(|(_, e)| date.map_or(true, |d| e.date == d))
            .collect();
        entries.sort_by(|(ia, a), (ib, b)| b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia)));
        entries.into_iter().map(|(_, e)| e).collect()
    }

    pub fn get_habit_streak(&self, habit_id: &HabitId) -> Option<&HabitStreak> {
        self.state.streak(habit_id)
    }

    /// Recompute and persist one habit's streak; no-op for unknown habits
    pub async fn calculate_streak(&mut self, habit_id: &HabitId) -> Option<&HabitStreak> {
        self.state.habit(habit_id)?;
        self.recompute_streak(habit_id);
        self.persist().await;
        self.state.streak(habit_id)
    }

    // Import / export

    /// Serialize the full state into the export envelope
    pub fn export_data(&self) -> Result<String, StoreError> {
        let text = transfer::export_json(&self.state, Utc::now())?;
        info!("Exported {} habits", self.state.habits.len());
        Ok(text)
    }

    /// Replace the state with an exported payload
    ///
    /// Nothing changes if the payload is rejected. Streaks are recomputed
    /// from the imported entries.
    pub async fn import_data(&mut self, text: &str) -> Result<(), StoreError> {
        let snapshot = transfer::parse_import(text).map_err(|e| {
            warn!("Rejected import: {}", e);
            e
        })?;

        info!(
            "Importing {} habits and {} entries",
            snapshot.habits.len(),
            snapshot.habit_entries.len()
        );
        self.dispatch(Command::Load(snapshot));
        self.refresh_all_streaks();
        self.persist().await;
        Ok(())
    }

    /// Remove all persisted keys and return to empty defaults
    pub async fn reset_data(&mut self) -> Result<(), StoreError> {
        if let Err(e) = persistence::clear(&self.kv).await {
            error!("Error clearing data: {}", e);
            self.dispatch(Command::SetError(Some(SAVE_FAILED.to_string())));
            return Err(e.into());
        }

        warn!("All habit data has been reset");
        self.dispatch(Command::Reset);
        Ok(())
    }

    // User profile

    /// Create a local profile and make it the current user
    pub async fn register(&mut self, name: &str, email: &str) -> Result<User, StoreError> {
        let user = User::new(name, email)?;
        Ok(self.set_user(user).await)
    }

    /// Sign in with an email; the profile name is taken from the address
    pub async fn login(&mut self, email: &str) -> Result<User, StoreError> {
        let user = User::from_email(email)?;
        Ok(self.set_user(user).await)
    }

    pub async fn logout(&mut self) {
        if self.state.user.is_none() {
            return;
        }
        info!("Signing out");
        self.dispatch(Command::SetUser(None));
        self.persist().await;
    }

    /// `Ok(None)` when nobody is signed in
    pub async fn update_profile(&mut self, patch: ProfilePatch) -> Result<Option<User>, StoreError> {
        let Some(mut user) = self.state.user.clone() else {
            return Ok(None);
        };
        user.apply_profile(patch)?;
        Ok(Some(self.set_user(user).await))
    }

    /// `Ok(None)` when nobody is signed in
    pub async fn update_settings(&mut self, patch: SettingsPatch) -> Result<Option<User>, StoreError> {
        let Some(mut user) = self.state.user.clone() else {
            return Ok(None);
        };
        user.apply_settings(patch)?;
        Ok(Some(self.set_user(user).await))
    }

    pub async fn upgrade_to_premium(&mut self) -> Option<User> {
        let mut user = self.state.user.clone()?;
        user.upgrade_to_premium();
        info!("Upgraded {} to premium", user.email);
        Some(self.set_user(user).await)
    }

    /// Change and persist the theme preference
    pub async fn set_theme(&mut self, theme: ThemePreference) {
        self.dispatch(Command::SetTheme(theme));
        if let Err(e) = persistence::save_theme(&self.kv, theme).await {
            error!("Error saving theme: {}", e);
        }
    }

    // Statistics

    /// Statistics helper configured with the user's week start
    pub fn analytics(&self) -> AnalyticsEngine {
        match &self.state.user {
            Some(user) => AnalyticsEngine::with_week_start(user.settings.week_starts_on),
            None => AnalyticsEngine::new(),
        }
    }

    /// Last-seven-days summary ending today
    pub fn weekly_summary(&self) -> WeeklySummary {
        self.weekly_summary_ending(self.today())
    }

    /// Seven-day summary for the window ending on `date`
    pub fn weekly_summary_ending(&self, date: NaiveDate) -> WeeklySummary {
        self.analytics().weekly_summary(
            &self.state.habits,
            &self.state.habit_entries,
            &self.state.streaks,
            date,
        )
    }

    /// Progress toward a habit's target on `date`, 0-100
    pub fn completion_percentage(&self, habit_id: &HabitId, date: NaiveDate) -> Option<u32> {
        let habit = self.state.habit(habit_id)?;
        Some(self.analytics().completion_percentage(habit, &self.state.habit_entries, date))
    }

    // Internals

    fn dispatch(&mut self, command: Command) {
        self.state.apply(command);
    }

    async fn set_user(&mut self, user: User) -> User {
        debug!("Storing profile for {}", user.email);
        self.dispatch(Command::SetUser(Some(user.clone())));
        self.persist().await;
        user
    }

    /// Rebuild one habit's streak from its entries
    fn recompute_streak(&mut self, habit_id: &HabitId) {
        if self.state.habit(habit_id).is_none() {
            return;
        }
        let streak = HabitStreak::calculate(habit_id.clone(), self.state.entries_for(habit_id), self.today());
        debug!(
            "Streak for {}: current {}, longest {}",
            habit_id, streak.current_streak, streak.longest_streak
        );
        self.dispatch(Command::UpdateStreak(streak));
    }

    fn refresh_all_streaks(&mut self) {
        let ids: Vec<HabitId> = self.state.habits.iter().map(|h| h.id.clone()).collect();
        for habit_id in &ids {
            self.recompute_streak(habit_id);
        }
    }

    /// Write every data key; failures only set the error flag
    async fn persist(&mut self) {
        if let Err(e) = persistence::save_snapshot(&self.kv, &self.state).await {
            error!("Error saving data: {}", e);
            self.dispatch(Command::SetError(Some(SAVE_FAILED.to_string())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryKeyValueStore, StorageError};
    use async_trait::async_trait;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    async fn empty_store() -> HabitStore<MemoryKeyValueStore> {
        HabitStore::load(MemoryKeyValueStore::new()).await.with_fixed_today(day(10))
    }

    /// Reads succeed with nothing stored, every write fails
    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_habit_creates_zero_streak_and_persists() {
        let mut store = empty_store().await;
        let habit = store
            .add_habit(HabitDraft::new("Drink water", "Health", 8.0, "glasses"))
            .await
            .unwrap();

        let streak = store.get_habit_streak(&habit.id).unwrap();
        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.longest_streak, 0);
        assert!(store.kv().keys().contains(&"habits".to_string()));
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_habit_is_rejected() {
        let mut store = empty_store().await;
        let result = store.add_habit(HabitDraft::new("", "Health", 1.0, "")).await;
        assert!(matches!(result, Err(StoreError::Domain(_))));
        assert!(store.habits().is_empty());
    }

    #[tokio::test]
    async fn test_entries_drive_streak() {
        let mut store = empty_store().await;
        let habit = store.add_habit(HabitDraft::new("Run", "Health", 5.0, "km")).await.unwrap();

        for d in [8, 9, 10] {
            store
                .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(d), 5.0))
                .await
                .unwrap();
        }

        let streak = store.get_habit_streak(&habit.id).unwrap();
        assert_eq!(streak.current_streak, 3);
        assert_eq!(streak.longest_streak, 3);
        assert_eq!(streak.streak_start_date, Some(day(8)));
        assert_eq!(streak.last_completed_date, Some(day(10)));
    }

    #[tokio::test]
    async fn test_entry_for_unknown_habit_is_ignored() {
        let mut store = empty_store().await;
        let added = store
            .add_habit_entry(EntryDraft::completed(HabitId::new(), day(10), 1.0))
            .await
            .unwrap();
        assert!(added.is_none());
        assert!(store.state().habit_entries.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_entry_recompute_streak() {
        let mut store = empty_store().await;
        let habit = store.add_habit(HabitDraft::new("Read", "Learning", 1.0, "")).await.unwrap();
        let first = store
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(9), 1.0))
            .await
            .unwrap()
            .unwrap();
        let second = store
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(10), 1.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(store.get_habit_streak(&habit.id).unwrap().current_streak, 2);

        let patch = EntryPatch {
            completed: Some(false),
            ..Default::default()
        };
        store.update_habit_entry(&first.id, patch).await.unwrap().unwrap();
        assert_eq!(store.get_habit_streak(&habit.id).unwrap().current_streak, 1);

        assert!(store.delete_habit_entry(&second.id).await);
        assert_eq!(store.get_habit_streak(&habit.id).unwrap().current_streak, 0);
        assert!(!store.delete_habit_entry(&second.id).await);
    }

    #[tokio::test]
    async fn test_mark_done_toggles() {
        let mut store = empty_store().await;
        let habit = store.add_habit(HabitDraft::new("Stretch", "Health", 10.0, "min")).await.unwrap();

        let done = store.mark_done(&habit.id, day(10)).await.unwrap();
        assert!(done.completed);
        assert_eq!(done.value, 10.0);
        assert_eq!(store.get_habit_streak(&habit.id).unwrap().current_streak, 1);

        let undone = store.mark_done(&habit.id, day(10)).await.unwrap();
        assert!(!undone.completed);
        assert_eq!(undone.value, 0.0);

        assert!(store.mark_done(&HabitId::new(), day(10)).await.is_none());
    }

    #[tokio::test]
    async fn test_get_habit_entries_filters_by_day_newest_first() {
        let mut store = empty_store().await;
        let habit = store.add_habit(HabitDraft::new("Walk", "Health", 1.0, "")).await.unwrap();
        let a = store
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(10), 1.0))
            .await
            .unwrap()
            .unwrap();
        let b = store
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(10), 2.0))
            .await
            .unwrap()
            .unwrap();
        store
            .add_habit_entry(EntryDraft::completed(habit.id.clone(), day(9), 1.0))
            .await
            .unwrap();

        let on_day: Vec<&EntryId> = store
            .get_habit_entries(&habit.id, Some(day(10)))
            .into_iter()
            .map(|e| &e.id)
            .collect();
        assert_eq!(on_day.len(), 2);
        assert!(on_day.contains(&&a.id) && on_day.contains(&&b.id));
        assert_eq!(store.get_habit_entries(&habit.id, None).len(), 3);
    }

    #[tokio::test]
    async fn test_equal_timestamps_order_latest_recorded_first() {
        let text = r##"{
            "habits": [{
                "id": "h1", "name": "Walk", "category": "Health", "color": "#18A999",
                "icon": "directions_walk", "target": 2, "unit": "", "frequency": "daily",
                "isActive": true, "createdAt": "2024-05-01T08:00:00Z", "updatedAt": "2024-05-01T08:00:00Z"
            }],
            "habitEntries": [
                {"id": "e1", "habitId": "h1", "date": "2024-05-10", "value": 2, "completed": true, "timestamp": "2024-05-10T08:00:00Z"},
                {"id": "e2", "habitId": "h1", "date": "2024-05-10", "value": 0, "completed": false, "timestamp": "2024-05-10T08:00:00Z"}
            ]
        }"##;
        let mut store = empty_store().await;
        store.import_data(text).await.unwrap();
        let habit_id = HabitId::from("h1");

        let entries = store.get_habit_entries(&habit_id, Some(day(10)));
        assert_eq!(entries[0].id, EntryId::from("e2"));
        assert_eq!(entries[1].id, EntryId::from("e1"));

        let toggled = store.mark_done(&habit_id, day(10)).await.unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.value, 2.0);
    }

    #[tokio::test]
    async fn test_import_drops_streaks_without_habits() {
        let text = r##"{"habits": [], "streaks": [{"habitId": "ghost", "currentStreak": 40, "longestStreak": 40}]}"##;
        let mut store = empty_store().await;
        store.import_data(text).await.unwrap();

        assert!(store.get_habit_streak(&HabitId::from("ghost")).is_none());
        assert!(store.state().streaks.is_empty());
    }

    #[tokio::test]
    async fn test_weekly_summary_ending_on_a_past_day() {
        let mut store = empty_store().await;
        let run = store.add_habit(HabitDraft::new("Run", "Health", 1.0, "")).await.unwrap();
        store.mark_done(&run.id, day(2)).await.unwrap();
        store.mark_done(&run.id, day(10)).await.unwrap();

        assert_eq!(store.weekly_summary().total_completed, 1);
        let earlier = store.weekly_summary_ending(day(3));
        assert_eq!(earlier.total_completed, 1);
        assert_eq!(earlier.top_habits[0].completed_count, 1);
        assert_eq!(store.weekly_summary_ending(day(20)).total_completed, 0);
    }

    #[tokio::test]
    async fn test_update_habit() {
        let mut store = empty_store().await;
        let habit = store.add_habit(HabitDraft::new("Run", "Health", 5.0, "km")).await.unwrap();

        let patch = HabitPatch {
            name: Some("Long run".to_string()),
            target: Some(10.0),
            ..Default::default()
        };
        let updated = store.update_habit(&habit.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "Long run");
        assert_eq!(store.habit(&habit.id).unwrap().target, 10.0);

        let bad = HabitPatch {
            target: Some(-1.0),
            ..Default::default()
        };
        assert!(store.update_habit(&habit.id, bad).await.is_err());
        assert_eq!(store.habit(&habit.id).unwrap().target, 10.0);

        let missing = store.update_habit(&HabitId::new(), HabitPatch::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_user_operations_require_a_user() {
        let mut store = empty_store().await;
        assert!(store.update_profile(ProfilePatch::default()).await.unwrap().is_none());
        assert!(store.update_settings(SettingsPatch::default()).await.unwrap().is_none());
        assert!(store.upgrade_to_premium().await.is_none());

        store.login("sam@example.com").await.unwrap();
        assert_eq!(store.user().unwrap().name, "sam");

        let settings = SettingsPatch {
            week_starts_on: Some(0),
            ..Default::default()
        };
        store.update_settings(settings).await.unwrap().unwrap();
        assert_eq!(store.analytics().week_days(day(15))[0], day(12));

        assert!(store.upgrade_to_premium().await.unwrap().premium);
        store.logout().await;
        assert!(store.user().is_none());
    }

    #[tokio::test]
    async fn test_theme_is_persisted() {
        let mut store = empty_store().await;
        store.set_theme(ThemePreference::Dark).await;

        let reloaded = HabitStore::load(store.into_inner()).await;
        assert_eq!(reloaded.theme(), ThemePreference::Dark);
    }

    #[tokio::test]
    async fn test_save_failure_sets_error_flag() {
        let mut store = HabitStore::load(ReadOnlyStore).await;
        assert!(store.error().is_none());

        let habit = store.add_habit(HabitDraft::new("Run", "Health", 1.0, "")).await.unwrap();
        assert_eq!(store.error(), Some("Failed to save data"));
        assert!(store.habit(&habit.id).is_some());

        store.clear_error();
        assert!(store.reset_data().await.is_err());
        assert_eq!(store.error(), Some("Failed to save data"));
        assert_eq!(store.habits().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_data_sets_load_error() {
        let kv = MemoryKeyValueStore::with_values([("habits", "{oops")]);
        let store = HabitStore::load(kv).await;
        assert_eq!(store.error(), Some("Failed to load data"));
        assert!(store.habits().is_empty());
    }
}
