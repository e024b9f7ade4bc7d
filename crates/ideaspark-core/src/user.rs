//! User singleton: streak state and display/notification preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated `HH:MM` 24-hour time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationTime {
    hour: u8,
    minute: u8,
}

impl NotificationTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidValue {
                field: "notification_time".into(),
                message: format!("{hour:02}:{minute:02} is not a valid time of day"),
            });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Default for NotificationTime {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl std::str::FromStr for NotificationTime {
    type Err = ValidationError;

    // Strict HH:MM, both fields two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "notification_time".into(),
            message: format!("'{s}' is not in HH:MM 24-hour format"),
        };
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl std::fmt::Display for NotificationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for NotificationTime {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NotificationTime> for String {
    fn from(t: NotificationTime) -> Self {
        t.to_string()
    }
}

/// The singleton user record, created with defaults at first run and
/// mutated in place for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Consecutive calendar days with at least one entry creation.
    #[serde(default)]
    pub streak: u32,
    /// Timestamp of the most recent qualifying entry creation.
    #[serde(default)]
    pub last_entry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub notification_time: NotificationTime,
}

fn default_true() -> bool {
    true
}

impl Default for User {
    fn default() -> Self {
        Self {
            streak: 0,
            last_entry_date: None,
            dark_mode: false,
            notifications_enabled: true,
            notification_time: NotificationTime::default(),
        }
    }
}
