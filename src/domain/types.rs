/// Core types and enums used throughout the domain layer
///
/// This module defines identifiers, the habit Frequency, and the fixed
/// HabitCategory reference set used by Habit, HabitEntry and HabitStreak.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a habit
///
/// New ids are random UUIDs, but any non-empty text is accepted so that
/// previously exported data keeps its original identities on import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HabitId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a habit entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How often a habit is expected to be performed
///
/// Streaks are always counted in calendar days regardless of frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(DomainError::InvalidFrequency(format!(
                "Invalid frequency '{}'. Valid options: daily, weekly, monthly",
                other
            ))),
        }
    }
}

/// A category from the built-in reference set
///
/// Categories are static lookup data; habits refer to them by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

const DEFAULT_CATEGORIES: [HabitCategory; 6] = [
    HabitCategory {
        id: "1",
        name: "Health",
        color: "#18A999",
        icon: "fitness_center",
        description: "Physical health and fitness",
    },
    HabitCategory {
        id: "2",
        name: "Learning",
        color: "#F7B32B",
        icon: "school",
        description: "Education and skill development",
    },
    HabitCategory {
        id: "3",
        name: "Productivity",
        color: "#FF6B4A",
        icon: "work",
        description: "Work and efficiency",
    },
    HabitCategory {
        id: "4",
        name: "Mindfulness",
        color: "#9C88FF",
        icon: "self_improvement",
        description: "Mental health and meditation",
    },
    HabitCategory {
        id: "5",
        name: "Social",
        color: "#FF9FF3",
        icon: "people",
        description: "Relationships and social connections",
    },
    HabitCategory {
        id: "6",
        name: "Creativity",
        color: "#54A0FF",
        icon: "palette",
        description: "Art and creative pursuits",
    },
];

impl HabitCategory {
    /// All built-in categories in display order
    pub fn defaults() -> &'static [HabitCategory] {
        &DEFAULT_CATEGORIES
    }

    /// Find a category by name, ignoring case
    pub fn find(name: &str) -> Option<&'static HabitCategory> {
        let name = name.trim();
        DEFAULT_CATEGORIES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
