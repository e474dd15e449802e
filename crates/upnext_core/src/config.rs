//! Core runtime configuration.
//!
//! # Responsibility
//! - Carry the data directory, logging settings and reminder feed scope.
//! - Resolve well-known database file paths under the data directory.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the alarm database inside the data directory.
pub const ALARM_DB_FILE: &str = "upnext_alarms.sqlite3";
/// File name of the reminder database inside the data directory.
pub const REMINDER_DB_FILE: &str = "upnext_reminders.sqlite3";

/// Which reminders the reminder store publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderScope {
    /// Every reminder, completed or overdue included.
    All,
    /// Not completed and due at or after "now".
    #[default]
    Pending,
}

impl ReminderScope {
    /// Parses `all` or `pending`, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Runtime configuration shared by the core and its consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub reminder_scope: ReminderScope,
}

impl CoreConfig {
    /// Config rooted at `data_dir` with build-mode logging defaults.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            log_level: default_log_level().to_string(),
            log_dir: None,
            reminder_scope: ReminderScope::default(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_reminder_scope(mut self, scope: ReminderScope) -> Self {
        self.reminder_scope = scope;
        self
    }

    pub fn alarm_db_path(&self) -> PathBuf {
        self.data_dir.join(ALARM_DB_FILE)
    }

    pub fn reminder_db_path(&self) -> PathBuf {
        self.data_dir.join(REMINDER_DB_FILE)
    }

    /// Creates the data directory when missing.
    pub fn ensure_data_dir(&self) -> std::io::Result<&Path> {
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(self.data_dir.as_path())
    }
}
