//! Reminder domain model.
//!
//! # Responsibility
//! - Define the persisted reminder record and its priority scale.
//! - Validate new reminders against the creation instant.
//!
//! # Invariants
//! - `title` is non-blank once persisted.
//! - `due_at` is strictly after `created_at` for reminders created through
//!   a store.
//! - `created_at` never changes after creation.

use crate::model::validation::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned reminder identifier. `0` before persistence.
pub type ReminderId = i64;

/// Category used when the caller leaves it blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// Reminder urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Case-insensitive parse of `High|Medium|Low`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted reminder record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    /// Wall-clock due instant.
    pub due_at: NaiveDateTime,
    pub is_completed: bool,
    pub priority: Priority,
    pub category: String,
    pub created_at: NaiveDateTime,
}

impl Reminder {
    /// Creates an unsaved reminder with default priority and category.
    pub fn new(title: impl Into<String>, due_at: NaiveDateTime, created_at: NaiveDateTime) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: String::new(),
            due_at,
            is_completed: false,
            priority: Priority::default(),
            category: DEFAULT_CATEGORY.to_string(),
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Returns a copy with trimmed text fields and a defaulted category.
    pub fn normalized(&self) -> Self {
        let mut reminder = self.clone();
        reminder.title = reminder.title.trim().to_string();
        reminder.description = reminder.description.trim().to_string();
        let category = reminder.category.trim();
        reminder.category = if category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.to_string()
        };
        reminder
    }

    /// Validates fields required for any persisted reminder.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Validates a reminder about to be created at `now`.
    pub fn validate_new(&self, now: NaiveDateTime) -> Result<(), ValidationError> {
        self.validate()?;
        if self.due_at <= now {
            return Err(ValidationError::DueNotInFuture {
                due_at: self.due_at,
                now,
            });
        }
        Ok(())
    }

    /// Whether the reminder is still outstanding at `now`.
    pub fn is_pending_at(&self, now: NaiveDateTime) -> bool {
        !self.is_completed && self.due_at >= now
    }
}
