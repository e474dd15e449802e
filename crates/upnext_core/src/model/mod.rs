//! Domain records for alarms and reminders.
//!
//! # Responsibility
//! - Define the alarm and reminder records owned by their stores.
//! - Provide write-path validation shared by repositories and stores.
//!
//! # Invariants
//! - Records carry `id = 0` until a store assigns one.
//! - The core never mutates a stored record in place.

pub mod alarm;
pub mod reminder;
pub mod validation;
