//! Weekday sets used by recurring alarms.
//!
//! Day indices follow the persisted convention: `0 = Sunday` through
//! `6 = Saturday`.

use serde::{Deserialize, Serialize};

const DAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const ALL_DAYS: u8 = 0b111_1111;
const WORK_DAYS: u8 = 0b011_1110;
const WEEKEND_DAYS: u8 = 0b100_0001;

/// Set of weekday indices stored as a 7-bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);
    pub const EVERYDAY: Self = Self(ALL_DAYS);
    pub const WEEKDAYS: Self = Self(WORK_DAYS);
    pub const WEEKENDS: Self = Self(WEEKEND_DAYS);

    /// Builds a set from day indices. Returns the first out-of-range index
    /// as the error.
    pub fn from_days<I>(days: I) -> Result<Self, u8>
    where
        I: IntoIterator<Item = u8>,
    {
        let mut mask = 0u8;
        for day in days {
            if day > 6 {
                return Err(day);
            }
            mask |= 1 << day;
        }
        Ok(Self(mask))
    }

    /// Parses a persisted comma-joined list such as `"1,2,3"`.
    ///
    /// Tokens that are not integers in `0..=6` are skipped.
    pub fn parse_lenient(value: &str) -> Self {
        let mask = value
            .split(',')
            .filter_map(|token| token.trim().parse::<u8>().ok())
            .filter(|day| *day <= 6)
            .fold(0u8, |mask, day| mask | (1 << day));
        Self(mask)
    }

    pub fn contains(self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn insert(&mut self, day: u8) -> bool {
        if day > 6 || self.contains(day) {
            return false;
        }
        self.0 |= 1 << day;
        true
    }

    pub fn remove(&mut self, day: u8) -> bool {
        if !self.contains(day) {
            return false;
        }
        self.0 &= !(1 << day);
        true
    }

    /// Day indices in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..7u8).filter(move |day| self.contains(*day))
    }

    /// Comma-joined storage form, ascending.
    pub fn to_storage(self) -> String {
        self.iter()
            .map(|day| day.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Human-facing summary of the set.
    ///
    /// Full week, Monday-Friday and Saturday+Sunday get named labels; any
    /// other non-empty set lists three-letter abbreviations in index order.
    pub fn label(self) -> String {
        match self.0 {
            0 => "One-time".to_string(),
            ALL_DAYS => "Everyday".to_string(),
            WORK_DAYS => "Weekdays".to_string(),
            WEEKEND_DAYS => "Weekends".to_string(),
            _ => self
                .iter()
                .map(|day| DAY_ABBREVIATIONS[usize::from(day)])
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(value: WeekdaySet) -> Self {
        value.iter().collect()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = String;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(value).map_err(|day| format!("weekday index {day} is out of range 0..=6"))
    }
}
