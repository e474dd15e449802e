//! Next-occurrence resolution for alarms.
//!
//! # Responsibility
//! - Turn an alarm's persisted time/date/weekday fields plus a reference
//!   "now" into a sortable instant and human-facing labels.
//!
//! # Invariants
//! - Resolution is total: malformed input never fails, it falls back to the
//!   raw text as the label and to a deterministic sort key.
//! - A specific date takes precedence over a weekday set.
//! - Weekday-set and one-time alarms are anchored on the reference date.
//!   The next matching weekday is not searched for.

use crate::clock::wall_clock_millis;
use crate::schedule::time_of_day::TimeOfDay;
use crate::schedule::weekday::WeekdaySet;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Persisted calendar date format for specific-date alarms.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which calendar days an alarm applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Recurrence {
    /// Fires on one explicit calendar date.
    SpecificDate(NaiveDate),
    /// Repeats on the given non-empty weekday set.
    Weekdays(WeekdaySet),
    /// No date and no weekdays.
    OneTime,
}

impl Recurrence {
    /// Builds a recurrence from optional parts, giving the date precedence.
    pub fn from_parts(date: Option<NaiveDate>, days: WeekdaySet) -> Self {
        match date {
            Some(date) => Self::SpecificDate(date),
            None if days.is_empty() => Self::OneTime,
            None => Self::Weekdays(days),
        }
    }
}

/// Resolved placement of one alarm relative to a reference "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// 12-hour time text, or the raw time input when it did not parse.
    pub display_time: String,
    /// `Today`, `Tomorrow`, a formatted date, or a weekday-set label.
    pub day_label: String,
    /// Minutes since midnight; `0` when the time did not parse.
    pub minute_of_day: u32,
    /// Wall-clock epoch milliseconds of the anchored occurrence.
    pub sort_key: i64,
    /// Whether any input field had to fall back.
    pub is_fallback: bool,
}

/// Resolves an alarm's occurrence from its persisted fields.
///
/// `date` is the persisted `YYYY-MM-DD` text (blank counts as absent) and
/// `time` the persisted `HH:MM` text.
pub fn resolve_occurrence(
    time: &str,
    date: Option<&str>,
    days: WeekdaySet,
    now: NaiveDateTime,
) -> Occurrence {
    let today = now.date();
    let parsed_time = TimeOfDay::parse(time);
    let mut is_fallback = parsed_time.is_none();

    let (display_time, time_of_day) = match parsed_time {
        Some(value) => (value.format_12h(), value),
        None => (time.trim().to_string(), TimeOfDay::MIDNIGHT),
    };

    let date_text = date.map(str::trim).filter(|value| !value.is_empty());
    let (anchor, day_label) = match date_text {
        Some(text) => match NaiveDate::parse_from_str(text, DATE_FORMAT) {
            Ok(value) => (value, date_label(value, today)),
            Err(_) => {
                is_fallback = true;
                (today, text.to_string())
            }
        },
        None => (today, days.label()),
    };

    Occurrence {
        display_time,
        day_label,
        minute_of_day: time_of_day.minute_of_day(),
        sort_key: wall_clock_millis(anchor.and_time(time_of_day.to_naive_time())),
        is_fallback,
    }
}

/// Resolves an occurrence from already-typed fields.
pub fn resolve_typed(time: TimeOfDay, recurrence: Recurrence, now: NaiveDateTime) -> Occurrence {
    let today = now.date();
    let (anchor, day_label) = match recurrence {
        Recurrence::SpecificDate(value) => (value, date_label(value, today)),
        Recurrence::Weekdays(days) => (today, days.label()),
        Recurrence::OneTime => (today, WeekdaySet::EMPTY.label()),
    };
    Occurrence {
        display_time: time.format_12h(),
        day_label,
        minute_of_day: time.minute_of_day(),
        sort_key: wall_clock_millis(anchor.and_time(time.to_naive_time())),
        is_fallback: false,
    }
}

/// Labels a specific date relative to `today`.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }
    if date.year() == today.year() {
        date.format("%a, %d %b").to_string()
    } else {
        date.format("%a, %d %b %Y").to_string()
    }
}
