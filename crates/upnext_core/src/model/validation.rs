//! Write-path validation errors.

use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for a record that must not be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Alarm time is not `HH:MM` within a 24-hour day.
    InvalidTime(String),
    /// Alarm date is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// Alarm carries both a specific date and a weekday set.
    ConflictingRecurrence,
    /// Reminder title is empty after trimming.
    BlankTitle,
    /// Reminder due time is not strictly after the creation instant.
    DueNotInFuture {
        due_at: NaiveDateTime,
        now: NaiveDateTime,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTime(value) => write!(f, "invalid alarm time `{value}`; expected HH:MM"),
            Self::InvalidDate(value) => {
                write!(f, "invalid alarm date `{value}`; expected YYYY-MM-DD")
            }
            Self::ConflictingRecurrence => {
                write!(f, "alarm cannot repeat on weekdays and also target a date")
            }
            Self::BlankTitle => write!(f, "reminder title cannot be blank"),
            Self::DueNotInFuture { due_at, now } => write!(
                f,
                "reminder due time {due_at} must be after the current time {now}"
            ),
        }
    }
}

impl Error for ValidationError {}
