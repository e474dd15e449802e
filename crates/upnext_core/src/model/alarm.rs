//! Alarm domain model.
//!
//! # Responsibility
//! - Define the persisted alarm record.
//! - Expose typed views (`TimeOfDay`, `Recurrence`) over persisted text.
//!
//! # Invariants
//! - `time` and `date` keep their persisted text so that malformed legacy
//!   rows still load; typed accessors return `None` for such rows.
//! - A non-blank `date` takes precedence over `days`.
//! - `is_enabled` defaults to `true`; disabled alarms are still listed.
//!
//! # See also
//! - crate::schedule::resolver

use crate::model::validation::ValidationError;
use crate::schedule::resolver::{Recurrence, DATE_FORMAT};
use crate::schedule::time_of_day::TimeOfDay;
use crate::schedule::weekday::WeekdaySet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned alarm identifier. `0` before persistence.
pub type AlarmId = i64;

/// Name used when the caller leaves it blank.
pub const DEFAULT_ALARM_NAME: &str = "Alarm";

/// Persisted alarm record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: AlarmId,
    /// 24-hour `HH:MM` text.
    pub time: String,
    pub name: String,
    /// Weekdays the alarm repeats on. Ignored when `date` is set.
    pub days: WeekdaySet,
    /// `YYYY-MM-DD` text for a single-date alarm.
    pub date: Option<String>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub snooze_enabled: bool,
    pub is_enabled: bool,
}

impl Alarm {
    /// Creates an unsaved one-time alarm with default name and toggles on.
    pub fn new(time: TimeOfDay) -> Self {
        Self {
            id: 0,
            time: time.to_storage(),
            name: DEFAULT_ALARM_NAME.to_string(),
            days: WeekdaySet::EMPTY,
            date: None,
            sound_enabled: true,
            vibration_enabled: true,
            snooze_enabled: true,
            is_enabled: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Makes the alarm repeat on `days` and clears any specific date.
    pub fn repeating(mut self, days: WeekdaySet) -> Self {
        self.days = days;
        self.date = None;
        self
    }

    /// Pins the alarm to one date and clears the weekday set.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format(DATE_FORMAT).to_string());
        self.days = WeekdaySet::EMPTY;
        self
    }

    pub fn time_of_day(&self) -> Option<TimeOfDay> {
        TimeOfDay::parse(&self.time)
    }

    /// Non-blank persisted date text, if any.
    pub fn date_text(&self) -> Option<&str> {
        self.date
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Typed recurrence, or `None` when the persisted date is malformed.
    pub fn recurrence(&self) -> Option<Recurrence> {
        let date = match self.date_text() {
            Some(text) => Some(NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?),
            None => None,
        };
        Some(Recurrence::from_parts(date, self.days))
    }

    /// Whether both a date and a non-empty weekday set are present.
    ///
    /// Such records resolve with the date winning when read, but are
    /// rejected by [`Alarm::validate`].
    pub fn has_conflicting_recurrence(&self) -> bool {
        self.date_text().is_some() && !self.days.is_empty()
    }

    /// Validates fields that must be well-formed before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time_of_day().is_none() {
            return Err(ValidationError::InvalidTime(self.time.clone()));
        }
        if let Some(text) = self.date_text() {
            if NaiveDate::parse_from_str(text, DATE_FORMAT).is_err() {
                return Err(ValidationError::InvalidDate(text.to_string()));
            }
        }
        if self.has_conflicting_recurrence() {
            return Err(ValidationError::ConflictingRecurrence);
        }
        Ok(())
    }

    /// Returns a copy with a blank name replaced by the default name.
    pub fn normalized(&self) -> Self {
        let mut alarm = self.clone();
        let trimmed = alarm.name.trim();
        alarm.name = if trimmed.is_empty() {
            DEFAULT_ALARM_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        alarm
    }
}

#[cfg(test)]
mod tests {
    use super::{Alarm, DEFAULT_ALARM_NAME};
    use crate::model::validation::ValidationError;
    use crate::schedule::resolver::Recurrence;
    use crate::schedule::time_of_day::TimeOfDay;
    use crate::schedule::weekday::WeekdaySet;
    use chrono::NaiveDate;

    #[test]
    fn new_alarm_uses_defaults() {
        let alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap());
        assert_eq!(alarm.id, 0);
        assert_eq!(alarm.time, "06:45");
        assert_eq!(alarm.name, DEFAULT_ALARM_NAME);
        assert!(alarm.is_enabled);
        assert_eq!(alarm.recurrence(), Some(Recurrence::OneTime));
    }

    #[test]
    fn builders_keep_recurrence_exclusive() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap())
            .repeating(WeekdaySet::WEEKDAYS)
            .on_date(date);
        assert!(!alarm.has_conflicting_recurrence());
        assert_eq!(alarm.recurrence(), Some(Recurrence::SpecificDate(date)));
    }

    #[test]
    fn legacy_rows_with_both_fields_resolve_to_date() {
        let mut alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap());
        alarm.days = WeekdaySet::WEEKENDS;
        alarm.date = Some("2026-10-24".to_string());
        assert!(alarm.has_conflicting_recurrence());
        assert!(matches!(alarm.recurrence(), Some(Recurrence::SpecificDate(_))));
        assert_eq!(alarm.validate(), Err(ValidationError::ConflictingRecurrence));
    }

    #[test]
    fn validate_rejects_malformed_fields() {
        let mut alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap());
        alarm.time = "25:00".to_string();
        assert_eq!(
            alarm.validate(),
            Err(ValidationError::InvalidTime("25:00".to_string()))
        );

        let mut alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap());
        alarm.date = Some("next week".to_string());
        assert_eq!(
            alarm.validate(),
            Err(ValidationError::InvalidDate("next week".to_string()))
        );
        assert_eq!(alarm.recurrence(), None);
    }

    #[test]
    fn normalized_fills_blank_name() {
        let alarm = Alarm::new(TimeOfDay::new(6, 45).unwrap()).with_name("   ");
        assert_eq!(alarm.normalized().name, DEFAULT_ALARM_NAME);
    }
}
