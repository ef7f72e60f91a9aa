/// HabitEntry entity for tracking habit progress
///
/// This module defines the HabitEntry struct that represents one recorded
/// instance of progress toward a habit on a specific calendar day.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, EntryId, HabitId};

/// A record of progress toward a habit on a specific day
///
/// `date` is a calendar day (serialized as `YYYY-MM-DD`) and is the only
/// field used for day-granularity logic. `timestamp` records when the entry
/// was created and is used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which habit this entry is for
    pub habit_id: HabitId,
    /// Which day this progress was for
    pub date: NaiveDate,
    /// Amount achieved, measured against the habit's target
    pub value: f64,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When this entry was created
    pub timestamp: DateTime<Utc>,
}

/// Everything needed to record an entry except its identity and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub value: f64,
    pub completed: bool,
    pub notes: Option<String>,
}

impl EntryDraft {
    /// A completed entry for `date` with the given value
    pub fn completed(habit_id: HabitId, date: NaiveDate, value: f64) -> Self {
        Self {
            habit_id,
            date,
            value,
            completed: true,
            notes: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A partial update to an entry; the owning habit cannot change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub value: Option<f64>,
    pub completed: Option<bool>,
    pub notes: Option<Option<String>>,
}

impl HabitEntry {
    /// Create a new entry from a draft with validation
    ///
    /// The timestamp is set to the current time.
    pub fn new(draft: EntryDraft) -> Result<Self, DomainError> {
        Self::validate_value(draft.value)?;
        Self::validate_notes(&draft.notes)?;

        Ok(Self {
            id: EntryId::new(),
            habit_id: draft.habit_id,
            date: draft.date,
            value: draft.value,
            completed: draft.completed,
            notes: draft.notes,
            timestamp: Utc::now(),
        })
    }

    /// Apply a patch; nothing changes if validation fails
    pub fn apply(&mut self, patch: EntryPatch) -> Result<(), DomainError> {
        if let Some(value) = patch.value {
            Self::validate_value(value)?;
        }
        if let Some(ref notes) = patch.notes {
            Self::validate_notes(notes)?;
        }

        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        Ok(())
    }

    /// Check that an entry loaded from elsewhere (e.g. an import) is well formed
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Entry id cannot be empty".to_string(),
            });
        }
        Self::validate_value(self.value)
    }

    /// Check if this entry has notes
    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    fn validate_value(value: f64) -> Result<(), DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("Entry value must be a non-negative number, got {}", value)
            });
        }
        Ok(())
    }

    fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
        if let Some(note_text) = notes {
            if note_text.chars().count() > 500 {
                return Err(DomainError::InvalidValue {
                    message: "Notes cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }
}
