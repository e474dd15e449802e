//! Alarm time-of-day value and its display format.
//!
//! # Invariants
//! - `hour` is within `0..=23` and `minute` within `0..=59`.
//! - Storage format is zero-padded 24-hour `HH:MM`.

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static STORED_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").expect("valid time regex"));

/// Hour and minute of a day on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Builds a time-of-day, rejecting out-of-range fields.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parses persisted `H:MM` / `HH:MM` text.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = STORED_TIME_RE.captures(value)?;
        let hour = caps.get(1)?.as_str().parse::<u8>().ok()?;
        let minute = caps.get(2)?.as_str().parse::<u8>().ok()?;
        Self::new(hour, minute)
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Offset from midnight in minutes.
    pub fn minute_of_day(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Zero-padded `HH:MM`, as written to storage.
    pub fn to_storage(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// 12-hour display form, e.g. `7:05 AM` or `12:30 PM`.
    pub fn format_12h(self) -> String {
        format_time(self.hour, self.minute)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Formats a 24-hour `(hour, minute)` pair for display on a 12-hour clock.
///
/// Hour `0` shows as `12 AM`; hours after noon subtract 12. Minutes are
/// always two digits.
pub fn format_time(hour: u8, minute: u8) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::{format_time, TimeOfDay};
    use regex::Regex;

    #[test]
    fn parse_accepts_padded_and_unpadded_hours() {
        assert_eq!(TimeOfDay::parse("07:30"), TimeOfDay::new(7, 30));
        assert_eq!(TimeOfDay::parse("7:30"), TimeOfDay::new(7, 30));
        assert_eq!(TimeOfDay::parse(" 23:59 "), TimeOfDay::new(23, 59));
    }

    #[test]
    fn parse_rejects_malformed_or_out_of_range() {
        for raw in ["", "7", "24:00", "12:60", "ab:cd", "07:3", "07-30", "07:30:00"] {
            assert_eq!(TimeOfDay::parse(raw), None, "`{raw}` should not parse");
        }
    }

    #[test]
    fn format_time_covers_every_minute_of_the_day() {
        let pattern = Regex::new(r"^(1[0-2]|[1-9]):[0-5][0-9] (AM|PM)$").unwrap();
        for hour in 0..=23u8 {
            for minute in 0..=59u8 {
                let text = format_time(hour, minute);
                assert!(pattern.is_match(&text), "unexpected format `{text}`");
            }
        }
    }

    #[test]
    fn format_time_handles_midnight_and_noon() {
        for minute in 0..=59u8 {
            assert_eq!(format_time(0, minute), format!("12:{minute:02} AM"));
            assert_eq!(format_time(12, minute), format!("12:{minute:02} PM"));
        }
        assert_eq!(format_time(7, 5), "7:05 AM");
        assert_eq!(format_time(23, 0), "11:00 PM");
    }

    #[test]
    fn storage_form_is_zero_padded() {
        let time = TimeOfDay::new(7, 5).unwrap();
        assert_eq!(time.to_storage(), "07:05");
        assert_eq!(time.minute_of_day(), 425);
    }
}
