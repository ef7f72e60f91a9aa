/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, HabitEntry, HabitStreak, User)
/// and their validation rules. The streak calculator lives here as a pure
/// function over a habit's entries.

pub mod habit;
pub mod entry;
pub mod streak;
pub mod types;
pub mod user;

// Re-export public types for easy access
pub use habit::*;
pub use entry::*;
pub use streak::*;
pub use types::*;
pub use user::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}
