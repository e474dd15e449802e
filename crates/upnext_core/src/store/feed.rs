//! Latest-value snapshot channel.
//!
//! # Invariants
//! - Every publish replaces the whole snapshot; subscribers never see a
//!   partially updated collection.
//! - Each publish allocates a new `Arc`, so pointer identity tells
//!   snapshots apart.

use std::sync::Arc;
use tokio::sync::watch;

/// Immutable full contents of a collection at one point in time.
pub type Snapshot<T> = Arc<Vec<T>>;

/// Publisher side of a snapshot stream.
#[derive(Debug)]
pub struct SnapshotFeed<T> {
    tx: watch::Sender<Snapshot<T>>,
}

impl<T> SnapshotFeed<T> {
    pub fn new(initial: Vec<T>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Replaces the current snapshot and notifies subscribers.
    ///
    /// Succeeds with or without live subscribers.
    pub fn publish(&self, items: Vec<T>) -> Snapshot<T> {
        let snapshot = Arc::new(items);
        self.tx.send_replace(Arc::clone(&snapshot));
        snapshot
    }

    /// Returns a receiver positioned at the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> Snapshot<T> {
        self.tx.borrow().clone()
    }
}
