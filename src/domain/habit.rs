/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents a user's habit
/// they want to track, along with the draft and patch types used to create
/// and modify habits through the store.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{DomainError, Frequency, HabitCategory, HabitId};

const FALLBACK_COLOR: &str = "#8EC5FC";
const FALLBACK_ICON: &str = "check_circle";

/// A habit represents something the user wants to do regularly
///
/// Each habit has a numeric target (e.g. 30 for "30 minutes") that entry
/// values are measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Optional detailed description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name, usually one of the built-in categories
    pub category: String,
    pub color: String,
    pub icon: String,
    /// Numeric goal per day, always greater than zero
    pub target: f64,
    /// Unit for the target value (e.g., "minutes", "pages", "reps")
    #[serde(default)]
    pub unit: String,
    pub frequency: Frequency,
    /// Optional reminder time of day ("HH:MM")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<String>,
    /// Whether this habit is currently active (can be paused)
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to create a habit except its identity and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct HabitDraft {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub color: String,
    pub icon: String,
    pub target: f64,
    pub unit: String,
    pub frequency: Frequency,
    pub reminder_time: Option<String>,
    pub is_active: bool,
}

impl HabitDraft {
    /// Start a daily, active habit draft
    ///
    /// Color and icon are taken from the matching built-in category when
    /// there is one.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        target: f64,
        unit: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let (color, icon) = match HabitCategory::find(&category) {
            Some(c) => (c.color, c.icon),
            None => (FALLBACK_COLOR, FALLBACK_ICON),
        };

        Self {
            name: name.into(),
            description: None,
            category,
            color: color.to_string(),
            icon: icon.to_string(),
            target,
            unit: unit.into(),
            frequency: Frequency::Daily,
            reminder_time: None,
            is_active: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn reminder_time(mut self, time: impl Into<String>) -> Self {
        self.reminder_time = Some(time.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A partial update to a habit; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub target: Option<f64>,
    pub unit: Option<String>,
    pub frequency: Option<Frequency>,
    pub reminder_time: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl Habit {
    /// Create a new habit from a draft with validation
    ///
    /// Assigns a fresh id and sets both timestamps to now.
    pub fn new(draft: HabitDraft) -> Result<Self, DomainError> {
        Self::validate_name(&draft.name)?;
        Self::validate_description(&draft.description)?;
        Self::validate_category(&draft.category)?;
        Self::validate_target(draft.target)?;
        Self::validate_unit(&draft.unit)?;

        let now = Utc::now();
        Ok(Self {
            id: HabitId::new(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            category: draft.category,
            color: draft.color,
            icon: draft.icon,
            target: draft.target,
            unit: draft.unit,
            frequency: draft.frequency,
            reminder_time: draft.reminder_time,
            is_active: draft.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a patch with validation
    ///
    /// All new values are validated before anything is applied, so a
    /// failed update leaves the habit untouched. `updated_at` is bumped on
    /// success.
    pub fn apply(&mut self, patch: HabitPatch) -> Result<(), DomainError> {
        if let Some(ref name) = patch.name {
            Self::validate_name(name)?;
        }
        if let Some(ref description) = patch.description {
            Self::validate_description(description)?;
        }
        if let Some(ref category) = patch.category {
            Self::validate_category(category)?;
        }
        if let Some(target) = patch.target {
            Self::validate_target(target)?;
        }
        if let Some(ref unit) = patch.unit {
            Self::validate_unit(unit)?;
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(target) = patch.target {
            self.target = target;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(reminder_time) = patch.reminder_time {
            self.reminder_time = reminder_time;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Check that a habit loaded from elsewhere (e.g. an import) is well formed
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Habit id cannot be empty".to_string(),
            });
        }
        Self::validate_name(&self.name)?;
        Self::validate_target(self.target)
    }

    /// Get a display string for the target (e.g., "30 minutes")
    pub fn target_display(&self) -> String {
        if self.unit.trim().is_empty() {
            format!("{}", self.target)
        } else {
            format!("{} {}", self.target, self.unit)
        }
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    fn validate_description(description: &Option<String>) -> Result<(), DomainError> {
        if let Some(desc) = description {
            if desc.chars().count() > 500 {
                return Err(DomainError::Validation {
                    message: "Description cannot be longer than 500 characters".to_string()
                });
            }
        }
        Ok(())
    }

    fn validate_category(category: &str) -> Result<(), DomainError> {
        if category.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Category cannot be empty".to_string()
            });
        }
        Ok(())
    }

    /// Targets must be positive finite numbers
    fn validate_target(target: f64) -> Result<(), DomainError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("Target must be greater than 0, got {}", target)
            });
        }
        Ok(())
    }

    fn validate_unit(unit: &str) -> Result<(), DomainError> {
        if unit.trim().chars().count() > 20 {
            return Err(DomainError::InvalidValue {
                message: "Unit cannot be longer than 20 characters".to_string()
            });
        }
        Ok(())
    }
}
