/// Import and export of the full store state as a JSON envelope
///
/// The envelope shape is
/// `{habits, habitEntries, streaks, user, userAchievements, exportedAt, version}`.
/// Imports must carry a `habits` array; every other collection is optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{DomainError, Habit, HabitEntry, HabitStreak, User, UserAchievement};
use crate::store::{AppState, Snapshot};

/// Schema version written into every export
pub const EXPORT_VERSION: &str = "1.0.0";

/// Reasons an import payload is rejected
///
/// A rejected import never changes the store.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("Invalid import data format: `habits` must be an array")]
    MissingHabits,

    #[error("malformed record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    #[error("invalid data: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    habits: &'a [Habit],
    habit_entries: &'a [HabitEntry],
    streaks: &'a [HabitStreak],
    user: Option<&'a User>,
    user_achievements: &'a [UserAchievement],
    exported_at: DateTime<Utc>,
    version: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportPayload {
    habits: Vec<Habit>,
    #[serde(default, deserialize_with = "null_as_default")]
    habit_entries: Vec<HabitEntry>,
    #[serde(default)]
    user: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    user_achievements: Vec<UserAchievement>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serialize the data collections of `state` into a pretty-printed envelope
pub fn export_json(state: &AppState, exported_at: DateTime<Utc>) -> Result<String, serde_json::Error> {
    let envelope = ExportEnvelope {
        habits: &state.habits,
        habit_entries: &state.habit_entries,
        streaks: &state.streaks,
        user: state.user.as_ref(),
        user_achievements: &state.user_achievements,
        exported_at,
        version: EXPORT_VERSION,
    };
    serde_json::to_string_pretty(&envelope)
}

/// Parse and validate an import payload
///
/// Streaks in the payload are dropped; they are derived from entries.
pub fn parse_import(text: &str) -> Result<Snapshot, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;

    let object = value.as_object().ok_or(ImportError::NotAnObject)?;
    if !matches!(object.get("habits"), Some(Value::Array(_))) {
        return Err(ImportError::MissingHabits);
    }

    let payload: ImportPayload = serde_json::from_value(value).map_err(ImportError::InvalidRecord)?;

    for habit in &payload.habits {
        habit.validate()?;
    }
    for entry in &payload.habit_entries {
        entry.validate()?;
    }

    Ok(Snapshot {
        habits: payload.habits,
        habit_entries: payload.habit_entries,
        streaks: Vec::new(),
        user: payload.user,
        user_achievements: payload.user_achievements,
    })
}
