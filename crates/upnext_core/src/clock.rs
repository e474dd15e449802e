//! Wall-clock time source.
//!
//! # Responsibility
//! - Provide the reference "now" used by occurrence resolution and
//!   reminder validation.
//! - Keep time injectable so tests can pin it.
//!
//! # Invariants
//! - Returned values are local wall-clock time with no zone attached.

use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Supplies the current wall-clock date-time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Shared clock handle passed into stores and the aggregator.
pub type SharedClock = Arc<dyn Clock>;

/// Production clock backed by the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Converts a wall-clock date-time into epoch milliseconds.
///
/// The value is zone-less: it is only meaningful relative to other values
/// produced by this function.
pub fn wall_clock_millis(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

/// Inverse of [`wall_clock_millis`]. Returns `None` when out of range.
pub fn from_wall_clock_millis(millis: i64) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_millis(millis).map(|value| value.naive_utc())
}
