use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use std::time::Duration;
use upnext_core::{
    open_alarm_db_in_memory, open_reminder_db_in_memory, recombine, Alarm, AlarmStore,
    FixedClock, Reminder, ReminderScope, ReminderStore, SharedClock, SnapshotFeed, SourceKind,
    SqliteAlarmRepository, SqliteReminderRepository, TimeOfDay, UpcomingAggregator, UpcomingItem,
    WeekdaySet,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn today_at(hour: u32, minute: u32) -> NaiveDateTime {
    monday().and_hms_opt(hour, minute, 0).unwrap()
}

fn clock() -> SharedClock {
    Arc::new(FixedClock(today_at(6, 0)))
}

fn at(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

fn kinds(items: &[UpcomingItem]) -> Vec<SourceKind> {
    items.iter().map(UpcomingItem::source_kind).collect()
}

#[test]
fn weekday_alarm_precedes_later_reminder() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    let reminder_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        clock(),
        ReminderScope::Pending,
    )
    .unwrap();
    let mut aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock());
    assert!(aggregator.current().is_empty());

    alarms
        .insert(&Alarm::new(at(7, 30)).with_name("Wake").repeating(WeekdaySet::WEEKDAYS))
        .unwrap();
    reminders
        .insert(&Reminder::new("Pay bill", today_at(9, 0), today_at(6, 0)))
        .unwrap();
    assert!(aggregator.sync());

    let view = aggregator.current();
    assert_eq!(kinds(&view), vec![SourceKind::Alarm, SourceKind::Reminder]);
    match &view[0] {
        UpcomingItem::Alarm(item) => {
            assert_eq!(item.display_time, "7:30 AM");
            assert_eq!(item.day_label, "Weekdays");
            assert_eq!(item.title, "Wake");
        }
        other => panic!("expected alarm first, got {other:?}"),
    }
    assert_eq!(view[1].title(), "Pay bill");
    assert_eq!(view[1].display_time(), "09:00");
}

#[test]
fn tomorrow_alarm_sorts_after_todays_reminders() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    let reminder_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        clock(),
        ReminderScope::Pending,
    )
    .unwrap();

    alarms
        .insert(&Alarm::new(at(23, 0)).on_date(monday().succ_opt().unwrap()))
        .unwrap();
    reminders
        .insert(&Reminder::new("Pack bag", today_at(22, 0), today_at(6, 0)))
        .unwrap();

    let aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock());
    let view = aggregator.current();
    assert_eq!(kinds(&view), vec![SourceKind::Reminder, SourceKind::Alarm]);
    match &view[1] {
        UpcomingItem::Alarm(item) => {
            assert_eq!(item.day_label, "Tomorrow");
            assert_eq!(item.display_time, "11:00 PM");
        }
        other => panic!("expected alarm last, got {other:?}"),
    }
}

#[test]
fn disabled_alarm_stays_listed_but_inactive() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    let reminder_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        clock(),
        ReminderScope::All,
    )
    .unwrap();
    let mut aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock());

    let id = alarms.insert(&Alarm::new(at(8, 0))).unwrap();
    aggregator.sync();
    assert_eq!(aggregator.active_count(), 1);

    alarms.set_enabled(id, false).unwrap();
    assert!(aggregator.sync());
    let view = aggregator.current();
    assert_eq!(view.len(), 1);
    assert!(!view[0].is_enabled());
    assert_eq!(aggregator.active_count(), 0);
}

#[test]
fn completed_reminder_follows_reminder_scope() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    let all_conn = open_reminder_db_in_memory().unwrap();
    let pending_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let all = ReminderStore::open(
        SqliteReminderRepository::new(&all_conn),
        clock(),
        ReminderScope::All,
    )
    .unwrap();
    let pending = ReminderStore::open(
        SqliteReminderRepository::new(&pending_conn),
        clock(),
        ReminderScope::Pending,
    )
    .unwrap();

    for store in [&all, &pending] {
        let id = store
            .insert(&Reminder::new("Water plants", today_at(18, 0), today_at(6, 0)))
            .unwrap();
        store.set_completed(id, true).unwrap();
    }

    let with_all = UpcomingAggregator::attach(&alarms, &all, clock());
    assert_eq!(with_all.current().len(), 1);
    assert!(!with_all.current()[0].is_enabled());

    let with_pending = UpcomingAggregator::attach(&alarms, &pending, clock());
    assert!(with_pending.current().is_empty());
}

#[test]
fn deleting_everything_empties_the_view() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    let reminder_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        clock(),
        ReminderScope::Pending,
    )
    .unwrap();
    let alarm_id = alarms.insert(&Alarm::new(at(7, 0))).unwrap();
    let reminder_id = reminders
        .insert(&Reminder::new("Stretch", today_at(10, 0), today_at(6, 0)))
        .unwrap();

    let mut aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock());
    assert_eq!(aggregator.current().len(), 2);

    alarms.delete(alarm_id).unwrap();
    reminders.delete(reminder_id).unwrap();
    assert!(aggregator.sync());
    assert!(aggregator.current().is_empty());
    assert_eq!(aggregator.active_count(), 0);
}

#[test]
fn malformed_alarm_falls_back_to_raw_text_at_midnight() {
    let alarm_conn = open_alarm_db_in_memory().unwrap();
    alarm_conn
        .execute(
            "INSERT INTO alarms (time, name, sound_enabled, vibration_enabled, snooze_enabled)
             VALUES ('soon', 'Legacy', 1, 1, 1);",
            [],
        )
        .unwrap();
    let reminder_conn = open_reminder_db_in_memory().unwrap();
    let alarms = AlarmStore::open(SqliteAlarmRepository::new(&alarm_conn)).unwrap();
    let reminders = ReminderStore::open(
        SqliteReminderRepository::new(&reminder_conn),
        clock(),
        ReminderScope::Pending,
    )
    .unwrap();
    alarms.insert(&Alarm::new(at(5, 0))).unwrap();

    let aggregator = UpcomingAggregator::attach(&alarms, &reminders, clock());
    let view = aggregator.current();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].display_time(), "soon");
    assert_eq!(view[1].display_time(), "5:00 AM");
}

#[test]
fn recombining_same_snapshots_is_idempotent() {
    let alarms = vec![
        Alarm::new(at(9, 0)).repeating(WeekdaySet::EVERYDAY),
        Alarm::new(at(7, 0)),
    ];
    let reminders = vec![Reminder::new("Standup", today_at(8, 0), today_at(6, 0))];

    let first = recombine(&alarms, &reminders, today_at(6, 0));
    let second = recombine(&alarms, &reminders, today_at(6, 0));
    assert_eq!(first, second);
    let times: Vec<&str> = first.iter().map(UpcomingItem::display_time).collect();
    assert_eq!(times, vec!["7:00 AM", "08:00", "9:00 AM"]);
}

#[tokio::test]
async fn run_republishes_until_both_sources_close() {
    let alarms = SnapshotFeed::<Alarm>::new(Vec::new());
    let reminders = SnapshotFeed::<Reminder>::new(Vec::new());
    let aggregator = UpcomingAggregator::new(alarms.subscribe(), reminders.subscribe(), clock());
    let mut view = aggregator.subscribe();
    view.borrow_and_update();
    let task = tokio::spawn(aggregator.run());

    let mut alarm = Alarm::new(at(7, 0));
    alarm.id = 1;
    alarms.publish(vec![alarm]);
    tokio::time::timeout(Duration::from_secs(5), view.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.borrow_and_update().len(), 1);

    let mut reminder = Reminder::new("Call", today_at(6, 30), today_at(6, 0));
    reminder.id = 1;
    reminders.publish(vec![reminder]);
    tokio::time::timeout(Duration::from_secs(5), view.changed())
        .await
        .unwrap()
        .unwrap();
    let latest = view.borrow_and_update().clone();
    assert_eq!(kinds(&latest), vec![SourceKind::Reminder, SourceKind::Alarm]);

    drop(alarms);
    drop(reminders);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.borrow().len(), 2);
}
