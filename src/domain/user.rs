/// User profile, settings and achievements
///
/// The user is a local profile: there is no account backend, so login and
/// registration only create the record that the store persists.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Dark => "dark",
            ThemePreference::Light => "light",
            ThemePreference::System => "system",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemePreference::Dark),
            "light" => Ok(ThemePreference::Light),
            "system" => Ok(ThemePreference::System),
            other => Err(DomainError::InvalidSetting(format!(
                "Unknown theme '{}'. Valid options: dark, light, system",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub theme: ThemePreference,
    pub notifications: bool,
    /// Daily reminder time ("HH:MM")
    pub reminder_time: String,
    /// 0 = Sunday, 1 = Monday
    pub week_starts_on: u8,
    pub language: String,
    pub timezone: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            notifications: true,
            reminder_time: "09:00".to_string(),
            week_starts_on: 1,
            language: "en".to_string(),
            timezone: std::env::var("TZ")
                .ok()
                .filter(|tz| !tz.trim().is_empty())
                .unwrap_or_else(|| "UTC".to_string()),
        }
    }
}

/// A partial update to user settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub theme: Option<ThemePreference>,
    pub notifications: Option<bool>,
    pub reminder_time: Option<String>,
    pub week_starts_on: Option<u8>,
    pub language: Option<String>,
    pub timezone: Option<String>,
}

/// A partial update to the profile fields of a user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settings: UserSettings,
}

impl User {
    /// Create a local profile with default settings
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let email = email.into();
        validate_email(&email)?;
        if name.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Name cannot be empty".to_string(),
            });
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            avatar: None,
            premium: false,
            premium_expiry: None,
            created_at: Utc::now(),
            updated_at: None,
            settings: UserSettings::default(),
        })
    }

    /// Create a profile whose name is the local part of the email
    pub fn from_email(email: &str) -> Result<Self, DomainError> {
        validate_email(email)?;
        let name = email.trim().split('@').next().unwrap_or_default();
        Self::new(name, email)
    }

    pub fn apply_profile(&mut self, patch: ProfilePatch) -> Result<(), DomainError> {
        if let Some(ref email) = patch.email {
            validate_email(email)?;
        }
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::Validation {
                    message: "Name cannot be empty".to_string(),
                });
            }
        }

        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_string();
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn apply_settings(&mut self, patch: SettingsPatch) -> Result<(), DomainError> {
        if let Some(day) = patch.week_starts_on {
            if day > 1 {
                return Err(DomainError::InvalidSetting(format!(
                    "Week must start on 0 (Sunday) or 1 (Monday), got {}",
                    day
                )));
            }
        }
        if let Some(ref time) = patch.reminder_time {
            validate_time_of_day(time)?;
        }

        let settings = &mut self.settings;
        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(notifications) = patch.notifications {
            settings.notifications = notifications;
        }
        if let Some(time) = patch.reminder_time {
            settings.reminder_time = time;
        }
        if let Some(day) = patch.week_starts_on {
            settings.week_starts_on = day;
        }
        if let Some(language) = patch.language {
            settings.language = language;
        }
        if let Some(timezone) = patch.timezone {
            settings.timezone = timezone;
        }
        Ok(())
    }

    /// Grant one year of premium starting now
    pub fn upgrade_to_premium(&mut self) {
        let now = Utc::now();
        self.premium = true;
        self.premium_expiry = Some(now.checked_add_months(Months::new(12)).unwrap_or(now));
    }

    /// Whether premium is active at `now`
    pub fn has_premium(&self, now: DateTime<Utc>) -> bool {
        self.premium && self.premium_expiry.map_or(true, |expiry| expiry > now)
    }
}

/// An achievement unlocked by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub achievement_id: String,
    pub user_id: String,
    pub unlocked_at: DateTime<Utc>,
    #[serde(default)]
    pub progress: f64,
}

/// Accept `local@domain.tld` with no whitespace
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let email = email.trim();
    let invalid = || DomainError::InvalidEmail(email.to_string());

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

fn validate_time_of_day(time: &str) -> Result<(), DomainError> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| DomainError::InvalidSetting(format!("Invalid reminder time '{}', expected HH:MM", time)))
}
