//! Merged, time-ordered "upcoming" view over alarms and reminders.
//!
//! # Responsibility
//! - Project alarm and reminder records into one item shape.
//! - Merge both kinds into a single deterministic ordering.
//! - Recompute and republish the merged view whenever a source changes.
//!
//! # Invariants
//! - Every recombination is a full recomputation from the latest snapshot
//!   pair; there is no incremental diffing.
//! - Items are ordered by sort key, then id, then source kind.

pub mod aggregator;
pub mod item;
pub mod merge;
pub mod projection;
