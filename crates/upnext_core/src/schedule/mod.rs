//! Alarm time and recurrence resolution.
//!
//! # Responsibility
//! - Parse and format alarm times of day.
//! - Describe weekday recurrence sets.
//! - Resolve an alarm's next occurrence and day label against a reference
//!   date.
//!
//! # Invariants
//! - Everything in this module is pure and never fails on malformed input.

pub mod resolver;
pub mod time_of_day;
pub mod weekday;
