/// Persistence adapter between the in-memory state and a key-value store
///
/// Each data collection is stored as a JSON blob under its own key. The theme
/// is stored as its bare name under `theme`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::ThemePreference;
use crate::storage::{keys, KeyValueStore, StorageError};
use crate::store::{AppState, Snapshot};

/// Read all five data keys concurrently
pub async fn load_snapshot<S>(kv: &S) -> Result<Snapshot, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let (habits, entries, streaks, user, achievements) = futures::try_join!(
        kv.get(keys::HABITS),
        kv.get(keys::HABIT_ENTRIES),
        kv.get(keys::STREAKS),
        kv.get(keys::USER),
        kv.get(keys::USER_ACHIEVEMENTS),
    )?;

    Ok(Snapshot {
        habits: decode(keys::HABITS, habits)?,
        habit_entries: decode(keys::HABIT_ENTRIES, entries)?,
        streaks: decode(keys::STREAKS, streaks)?,
        user: decode(keys::USER, user)?,
        user_achievements: decode(keys::USER_ACHIEVEMENTS, achievements)?,
    })
}

/// Write all five data keys
pub async fn save_snapshot<S>(kv: &S, state: &AppState) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let habits = encode(keys::HABITS, &state.habits)?;
    let entries = encode(keys::HABIT_ENTRIES, &state.habit_entries)?;
    let streaks = encode(keys::STREAKS, &state.streaks)?;
    let user = encode(keys::USER, &state.user)?;
    let achievements = encode(keys::USER_ACHIEVEMENTS, &state.user_achievements)?;

    futures::try_join!(
        kv.set(keys::HABITS, &habits),
        kv.set(keys::HABIT_ENTRIES, &entries),
        kv.set(keys::STREAKS, &streaks),
        kv.set(keys::USER, &user),
        kv.set(keys::USER_ACHIEVEMENTS, &achievements),
    )?;

    tracing::debug!(
        "Saved {} habits, {} entries, {} streaks",
        state.habits.len(),
        state.habit_entries.len(),
        state.streaks.len()
    );
    Ok(())
}

/// Read the theme; unknown values fall back to the system theme
pub async fn load_theme<S>(kv: &S) -> Result<ThemePreference, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let theme = match kv.get(keys::THEME).await? {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unknown stored theme '{}'", raw);
            ThemePreference::System
        }),
        None => ThemePreference::System,
    };
    Ok(theme)
}

pub async fn save_theme<S>(kv: &S, theme: ThemePreference) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    kv.set(keys::THEME, theme.as_str()).await
}

/// Remove every key the store owns
pub async fn clear<S>(kv: &S) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    kv.remove_many(&keys::ALL).await
}

/// Absent keys and JSON `null` both decode to the empty default
fn decode<T>(key: &str, raw: Option<String>) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = raw else {
        return Ok(T::default());
    };

    let value: Option<T> = serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })?;
    Ok(value.unwrap_or_default())
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Serialization {
        key: key.to_string(),
        source,
    })
}
