//! Reactive recombination of the alarm and reminder snapshot streams.
//!
//! # Responsibility
//! - Track the last-seen snapshot of each source.
//! - Recombine on any source change and republish the merged list.
//!
//! # Invariants
//! - The snapshot pair is replaced as a whole on every update.
//! - A source that stops publishing (or closes) keeps its last snapshot.
//! - Recombination is synchronous and performs no I/O.
//!
//! # See also
//! - crate::upcoming::merge

use crate::clock::SharedClock;
use crate::model::alarm::Alarm;
use crate::model::reminder::Reminder;
use crate::repo::alarm_repo::AlarmRepository;
use crate::repo::reminder_repo::ReminderRepository;
use crate::store::alarm_store::AlarmStore;
use crate::store::feed::Snapshot;
use crate::store::reminder_store::ReminderStore;
use crate::upcoming::item::UpcomingItem;
use crate::upcoming::merge::recombine;
use log::debug;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

#[derive(Debug, Clone)]
struct SourcePair {
    alarms: Snapshot<Alarm>,
    reminders: Snapshot<Reminder>,
}

/// Merges two independently updating collections into one ordered view.
pub struct UpcomingAggregator {
    alarms_rx: watch::Receiver<Snapshot<Alarm>>,
    reminders_rx: watch::Receiver<Snapshot<Reminder>>,
    latest: SourcePair,
    clock: SharedClock,
    output: watch::Sender<Snapshot<UpcomingItem>>,
    generation: u64,
}

impl UpcomingAggregator {
    /// Creates an aggregator over two snapshot streams and computes the
    /// initial view immediately.
    pub fn new(
        mut alarms_rx: watch::Receiver<Snapshot<Alarm>>,
        mut reminders_rx: watch::Receiver<Snapshot<Reminder>>,
        clock: SharedClock,
    ) -> Self {
        let latest = SourcePair {
            alarms: alarms_rx.borrow_and_update().clone(),
            reminders: reminders_rx.borrow_and_update().clone(),
        };
        let (output, _rx) = watch::channel(Arc::new(Vec::new()));
        let mut aggregator = Self {
            alarms_rx,
            reminders_rx,
            latest,
            clock,
            output,
            generation: 0,
        };
        aggregator.refresh();
        aggregator
    }

    /// Creates an aggregator subscribed to both stores.
    pub fn attach<A, R>(alarms: &AlarmStore<A>, reminders: &ReminderStore<R>, clock: SharedClock) -> Self
    where
        A: AlarmRepository,
        R: ReminderRepository,
    {
        Self::new(alarms.watch(), reminders.watch(), clock)
    }

    /// Receiver of the merged view; it yields a new list after every
    /// recombination.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<UpcomingItem>> {
        self.output.subscribe()
    }

    /// Latest merged view.
    pub fn current(&self) -> Snapshot<UpcomingItem> {
        self.output.borrow().clone()
    }

    /// Number of recombinations published so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of enabled items in the latest view.
    pub fn active_count(&self) -> usize {
        self.output
            .borrow()
            .iter()
            .filter(|item| item.is_enabled())
            .count()
    }

    /// Pulls any snapshot published since the last pass and recombines.
    ///
    /// Returns `true` when at least one source had changed.
    pub fn sync(&mut self) -> bool {
        let alarms = self.alarms_rx.borrow_and_update().clone();
        let reminders = self.reminders_rx.borrow_and_update().clone();
        let alarms_changed = !Arc::ptr_eq(&alarms, &self.latest.alarms);
        let reminders_changed = !Arc::ptr_eq(&reminders, &self.latest.reminders);
        if !alarms_changed && !reminders_changed {
            return false;
        }

        self.latest = SourcePair { alarms, reminders };
        debug!(
            "event=upcoming_source_changed module=upcoming alarms_changed={} reminders_changed={}",
            alarms_changed, reminders_changed
        );
        self.refresh();
        true
    }

    /// Recombines the current snapshot pair against the clock's "now".
    ///
    /// Useful when only time has moved, e.g. across midnight.
    pub fn refresh(&mut self) {
        let started_at = Instant::now();
        let pair = self.latest.clone();
        let items = recombine(&pair.alarms, &pair.reminders, self.clock.now());
        let count = items.len();
        self.output.send_replace(Arc::new(items));
        self.generation += 1;
        debug!(
            "event=upcoming_recombine module=upcoming status=ok generation={} alarms={} reminders={} items={} duration_us={}",
            self.generation,
            pair.alarms.len(),
            pair.reminders.len(),
            count,
            started_at.elapsed().as_micros()
        );
    }

    /// Recombines on every source notification until both sources close.
    pub async fn run(mut self) {
        let mut alarms_open = true;
        let mut reminders_open = true;
        while alarms_open || reminders_open {
            tokio::select! {
                changed = self.alarms_rx.changed(), if alarms_open => {
                    alarms_open = changed.is_ok();
                }
                changed = self.reminders_rx.changed(), if reminders_open => {
                    reminders_open = changed.is_ok();
                }
            }
            self.sync();
        }
        debug!(
            "event=upcoming_run module=upcoming status=stopped generation={}",
            self.generation
        );
    }
}
