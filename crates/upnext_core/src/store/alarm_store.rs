//! Alarm store over an [`AlarmRepository`].

use crate::model::alarm::{Alarm, AlarmId};
use crate::repo::alarm_repo::AlarmRepository;
use crate::repo::RepoResult;
use crate::store::feed::{Snapshot, SnapshotFeed};
use log::debug;
use tokio::sync::watch;

/// Alarm collection that republishes after each successful write.
pub struct AlarmStore<R: AlarmRepository> {
    repo: R,
    feed: SnapshotFeed<Alarm>,
}

impl<R: AlarmRepository> AlarmStore<R> {
    /// Loads the current alarms and publishes them as the first snapshot.
    pub fn open(repo: R) -> RepoResult<Self> {
        let initial = repo.list_alarms()?;
        let store = Self {
            repo,
            feed: SnapshotFeed::new(initial),
        };
        debug!(
            "event=store_publish module=store store=alarms trigger=open items={}",
            store.feed.latest().len()
        );
        Ok(store)
    }

    /// Receiver positioned at the latest alarm snapshot.
    pub fn watch(&self) -> watch::Receiver<Snapshot<Alarm>> {
        self.feed.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<Alarm> {
        self.feed.latest()
    }

    /// Reads every alarm straight from the repository.
    pub fn list_all(&self) -> RepoResult<Vec<Alarm>> {
        self.repo.list_alarms()
    }

    pub fn get(&self, id: AlarmId) -> RepoResult<Option<Alarm>> {
        self.repo.get_alarm(id)
    }

    /// Persists a new alarm and returns its assigned id.
    pub fn insert(&self, alarm: &Alarm) -> RepoResult<AlarmId> {
        let id = self.repo.create_alarm(&alarm.normalized())?;
        self.publish("insert")?;
        Ok(id)
    }

    pub fn update(&self, alarm: &Alarm) -> RepoResult<()> {
        self.repo.update_alarm(&alarm.normalized())?;
        self.publish("update")
    }

    pub fn delete(&self, id: AlarmId) -> RepoResult<()> {
        self.repo.delete_alarm(id)?;
        self.publish("delete")
    }

    /// Turns one alarm on or off. The alarm stays in the collection either way.
    pub fn set_enabled(&self, id: AlarmId, is_enabled: bool) -> RepoResult<()> {
        self.repo.set_enabled(id, is_enabled)?;
        self.publish("set_enabled")
    }

    fn publish(&self, trigger: &str) -> RepoResult<()> {
        let alarms = self.repo.list_alarms()?;
        let count = alarms.len();
        self.feed.publish(alarms);
        debug!("event=store_publish module=store store=alarms trigger={trigger} items={count}");
        Ok(())
    }
}
