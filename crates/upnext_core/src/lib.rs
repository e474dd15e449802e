//! Upcoming aggregation and ordering engine for alarms and reminders.
//! This crate owns scheduling resolution, persistence and the merged view.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod store;
pub mod upcoming;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use config::{CoreConfig, ReminderScope};
pub use db::{
    open_alarm_db, open_alarm_db_in_memory, open_reminder_db, open_reminder_db_in_memory,
    DbError, DbResult,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::alarm::{Alarm, AlarmId};
pub use model::reminder::{Priority, Reminder, ReminderId};
pub use model::validation::ValidationError;
pub use repo::alarm_repo::{AlarmRepository, SqliteAlarmRepository};
pub use repo::reminder_repo::{ReminderListQuery, ReminderRepository, SqliteReminderRepository};
pub use repo::{RecordKind, RepoError, RepoResult};
pub use schedule::resolver::{resolve_occurrence, Occurrence, Recurrence};
pub use schedule::time_of_day::{format_time, TimeOfDay};
pub use schedule::weekday::WeekdaySet;
pub use store::{AlarmStore, ReminderStore, Snapshot, SnapshotFeed};
pub use upcoming::aggregator::UpcomingAggregator;
pub use upcoming::item::{AlarmItem, ReminderItem, SourceKind, UpcomingItem};
pub use upcoming::merge::{compare_upcoming, recombine};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
