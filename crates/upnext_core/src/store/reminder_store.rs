//! Reminder store over a [`ReminderRepository`].
//!
//! # Invariants
//! - New reminders must be titled and due strictly after the clock's "now".
//! - `created_at` is stamped from the injected clock on insert.
//! - The published snapshot honours the configured [`ReminderScope`].

use crate::clock::SharedClock;
use crate::config::ReminderScope;
use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::reminder_repo::{ReminderListQuery, ReminderRepository};
use crate::repo::RepoResult;
use crate::store::feed::{Snapshot, SnapshotFeed};
use log::{debug, info};
use tokio::sync::watch;

/// Reminder collection that republishes after each successful write.
pub struct ReminderStore<R: ReminderRepository> {
    repo: R,
    feed: SnapshotFeed<Reminder>,
    clock: SharedClock,
    scope: ReminderScope,
}

impl<R: ReminderRepository> ReminderStore<R> {
    /// Loads reminders for `scope` and publishes them as the first snapshot.
    pub fn open(repo: R, clock: SharedClock, scope: ReminderScope) -> RepoResult<Self> {
        let initial = repo.list_reminders(scope_query(scope, &clock))?;
        let store = Self {
            repo,
            feed: SnapshotFeed::new(initial),
            clock,
            scope,
        };
        debug!(
            "event=store_publish module=store store=reminders trigger=open scope={:?} items={}",
            scope,
            store.feed.latest().len()
        );
        Ok(store)
    }

    pub fn watch(&self) -> watch::Receiver<Snapshot<Reminder>> {
        self.feed.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot<Reminder> {
        self.feed.latest()
    }

    pub fn scope(&self) -> ReminderScope {
        self.scope
    }

    /// Every reminder regardless of scope, ordered by due time.
    pub fn list_all(&self) -> RepoResult<Vec<Reminder>> {
        self.repo.list_reminders(ReminderListQuery::All)
    }

    pub fn get(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        self.repo.get_reminder(id)
    }

    /// Validates, normalizes and persists a new reminder.
    pub fn insert(&self, reminder: &Reminder) -> RepoResult<ReminderId> {
        let now = self.clock.now();
        let mut record = reminder.normalized();
        record.validate_new(now)?;
        record.created_at = now;

        let id = self.repo.create_reminder(&record)?;
        self.publish("insert")?;
        Ok(id)
    }

    pub fn update(&self, reminder: &Reminder) -> RepoResult<()> {
        self.repo.update_reminder(&reminder.normalized())?;
        self.publish("update")
    }

    pub fn delete(&self, id: ReminderId) -> RepoResult<()> {
        self.repo.delete_reminder(id)?;
        self.publish("delete")
    }

    pub fn set_completed(&self, id: ReminderId, is_completed: bool) -> RepoResult<()> {
        self.repo.set_completed(id, is_completed)?;
        self.publish("set_completed")
    }

    /// Completed reminders, most recently due first.
    pub fn list_completed(&self) -> RepoResult<Vec<Reminder>> {
        self.repo.list_completed()
    }

    /// Removes every completed reminder; returns the number removed.
    pub fn delete_completed(&self) -> RepoResult<usize> {
        let removed = self.repo.delete_completed()?;
        info!("event=reminders_clear_completed module=store status=ok removed={removed}");
        if removed > 0 {
            self.publish("delete_completed")?;
        }
        Ok(removed)
    }

    fn publish(&self, trigger: &str) -> RepoResult<()> {
        let reminders = self.repo.list_reminders(scope_query(self.scope, &self.clock))?;
        let count = reminders.len();
        self.feed.publish(reminders);
        debug!(
            "event=store_publish module=store store=reminders trigger={trigger} scope={:?} items={count}",
            self.scope
        );
        Ok(())
    }
}

fn scope_query(scope: ReminderScope, clock: &SharedClock) -> ReminderListQuery {
    match scope {
        ReminderScope::All => ReminderListQuery::All,
        ReminderScope::Pending => ReminderListQuery::PendingAt(clock.now()),
    }
}
