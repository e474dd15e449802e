//! Cross-kind ordering and full recombination.
//!
//! # Invariants
//! - `recombine` is a pure function of its inputs; equal inputs give equal
//!   output in the same order.
//! - The ordering is total: sort key, then id, then source kind.
//! - Weekday and one-time alarms compare as if they fire on the reference
//!   date, whichever weekdays they actually repeat on.

use crate::model::alarm::Alarm;
use crate::model::reminder::Reminder;
use crate::upcoming::item::UpcomingItem;
use crate::upcoming::projection::{project_alarm, project_reminder};
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Orders two upcoming items.
///
/// - alarm vs alarm: same-day alarms compare by minute of day, since both
///   keys share the reference-date anchor.
/// - reminder vs reminder: due instants.
/// - alarm vs reminder: the alarm's anchored instant against the due
///   instant.
pub fn compare_upcoming(left: &UpcomingItem, right: &UpcomingItem) -> Ordering {
    let by_time = match (left, right) {
        (UpcomingItem::Alarm(a), UpcomingItem::Alarm(b)) => a.sort_key.cmp(&b.sort_key),
        (UpcomingItem::Reminder(a), UpcomingItem::Reminder(b)) => a.sort_key.cmp(&b.sort_key),
        (UpcomingItem::Alarm(a), UpcomingItem::Reminder(r)) => a.sort_key.cmp(&r.sort_key),
        (UpcomingItem::Reminder(r), UpcomingItem::Alarm(a)) => r.sort_key.cmp(&a.sort_key),
    };

    by_time
        .then_with(|| left.id().cmp(&right.id()))
        .then_with(|| left.source_kind().cmp(&right.source_kind()))
}

/// Projects both snapshots and returns them as one ordered list.
pub fn recombine(alarms: &[Alarm], reminders: &[Reminder], now: NaiveDateTime) -> Vec<UpcomingItem> {
    let mut items = Vec::with_capacity(alarms.len() + reminders.len());
    items.extend(alarms.iter().map(|alarm| project_alarm(alarm, now)));
    items.extend(reminders.iter().map(project_reminder));
    items.sort_by(compare_upcoming);
    items
}
