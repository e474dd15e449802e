//! Record-to-item projection.
//!
//! Both projections are pure and total.

use crate::clock::wall_clock_millis;
use crate::model::alarm::Alarm;
use crate::model::reminder::Reminder;
use crate::schedule::resolver::resolve_occurrence;
use crate::upcoming::item::{AlarmItem, ReminderItem, UpcomingItem};
use chrono::NaiveDateTime;

/// Projects an alarm, resolving its occurrence against `now`.
pub fn project_alarm(alarm: &Alarm, now: NaiveDateTime) -> UpcomingItem {
    let occurrence = resolve_occurrence(&alarm.time, alarm.date.as_deref(), alarm.days, now);
    UpcomingItem::Alarm(AlarmItem {
        id: alarm.id,
        title: alarm.name.clone(),
        display_time: occurrence.display_time,
        day_label: occurrence.day_label,
        is_enabled: alarm.is_enabled,
        minute_of_day: occurrence.minute_of_day,
        sort_key: occurrence.sort_key,
    })
}

/// Projects a reminder using its absolute due instant.
pub fn project_reminder(reminder: &Reminder) -> UpcomingItem {
    UpcomingItem::Reminder(ReminderItem {
        id: reminder.id,
        title: reminder.title.clone(),
        display_time: reminder.due_at.format("%H:%M").to_string(),
        is_enabled: !reminder.is_completed,
        sort_key: wall_clock_millis(reminder.due_at),
        priority: reminder.priority,
        category: reminder.category.clone(),
    })
}
