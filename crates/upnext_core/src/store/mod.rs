//! Observed stores: repositories that publish full snapshots.
//!
//! # Responsibility
//! - Wrap a repository and expose its collection as a snapshot stream.
//! - Republish after every successful mutation.
//!
//! # Invariants
//! - A snapshot is published once on construction.
//! - Failed mutations publish nothing.
//!
//! # See also
//! - crate::upcoming::aggregator

pub mod alarm_store;
pub mod feed;
pub mod reminder_store;

pub use alarm_store::AlarmStore;
pub use feed::{Snapshot, SnapshotFeed};
pub use reminder_store::ReminderStore;
