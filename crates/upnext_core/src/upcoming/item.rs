//! Upcoming item shape shared by alarms and reminders.

use crate::model::reminder::Priority;
use serde::Serialize;

/// Which store an item was projected from.
///
/// Ordered so that alarms precede reminders on otherwise equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Alarm,
    Reminder,
}

/// Alarm projected for the upcoming view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlarmItem {
    pub id: i64,
    pub title: String,
    /// 12-hour time, or the raw persisted time when it was malformed.
    pub display_time: String,
    /// `Today`, `Tomorrow`, a date, or a weekday-set label.
    pub day_label: String,
    pub is_enabled: bool,
    pub minute_of_day: u32,
    /// Wall-clock epoch milliseconds of the occurrence anchored on its date,
    /// or on the reference date for weekday and one-time alarms.
    pub sort_key: i64,
}

/// Reminder projected for the upcoming view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderItem {
    pub id: i64,
    pub title: String,
    /// 24-hour `HH:MM` of the due instant.
    pub display_time: String,
    /// `false` once the reminder is completed.
    pub is_enabled: bool,
    /// Wall-clock epoch milliseconds of the due instant.
    pub sort_key: i64,
    pub priority: Priority,
    pub category: String,
}

/// One entry of the merged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpcomingItem {
    Alarm(AlarmItem),
    Reminder(ReminderItem),
}

impl UpcomingItem {
    pub fn source_kind(&self) -> SourceKind {
        match self {
            Self::Alarm(_) => SourceKind::Alarm,
            Self::Reminder(_) => SourceKind::Reminder,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Alarm(item) => item.id,
            Self::Reminder(item) => item.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Alarm(item) => &item.title,
            Self::Reminder(item) => &item.title,
        }
    }

    pub fn display_time(&self) -> &str {
        match self {
            Self::Alarm(item) => &item.display_time,
            Self::Reminder(item) => &item.display_time,
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Alarm(item) => item.is_enabled,
            Self::Reminder(item) => item.is_enabled,
        }
    }

    /// Comparable instant used by the merged ordering.
    pub fn sort_key(&self) -> i64 {
        match self {
            Self::Alarm(item) => item.sort_key,
            Self::Reminder(item) => item.sort_key,
        }
    }
}
