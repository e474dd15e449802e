use chrono::NaiveDate;
use upnext_core::{
    open_alarm_db_in_memory, Alarm, AlarmRepository, AlarmStore, RecordKind, RepoError,
    SqliteAlarmRepository, TimeOfDay, ValidationError, WeekdaySet,
};

fn at(hour: u8, minute: u8) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

#[test]
fn repository_round_trips_every_field() {
    let conn = open_alarm_db_in_memory().unwrap();
    let repo = SqliteAlarmRepository::new(&conn);

    let mut alarm = Alarm::new(at(6, 45))
        .with_name("Gym")
        .repeating(WeekdaySet::from_days([1, 3, 5]).unwrap());
    alarm.snooze_enabled = false;
    let id = repo.create_alarm(&alarm).unwrap();

    let loaded = repo.get_alarm(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.time, "06:45");
    assert_eq!(loaded.name, "Gym");
    assert_eq!(loaded.days, WeekdaySet::from_days([1, 3, 5]).unwrap());
    assert_eq!(loaded.date, None);
    assert!(!loaded.snooze_enabled);
    assert!(loaded.is_enabled);
}

#[test]
fn repository_rejects_malformed_time_and_date() {
    let conn = open_alarm_db_in_memory().unwrap();
    let repo = SqliteAlarmRepository::new(&conn);

    let mut bad_time = Alarm::new(at(7, 0));
    bad_time.time = "25:99".to_string();
    assert!(matches!(
        repo.create_alarm(&bad_time).unwrap_err(),
        RepoError::Validation(ValidationError::InvalidTime(_))
    ));

    let mut bad_date = Alarm::new(at(7, 0));
    bad_date.date = Some("2026-13-40".to_string());
    assert!(matches!(
        repo.create_alarm(&bad_date).unwrap_err(),
        RepoError::Validation(ValidationError::InvalidDate(_))
    ));
    assert!(repo.list_alarms().unwrap().is_empty());
}

#[test]
fn malformed_legacy_rows_still_load() {
    let conn = open_alarm_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO alarms (time, name, selected_days, sound_enabled, vibration_enabled, snooze_enabled, date)
         VALUES ('7am', 'Legacy', '1,x,9', 1, 1, 1, 'someday');",
        [],
    )
    .unwrap();

    let alarms = SqliteAlarmRepository::new(&conn).list_alarms().unwrap();
    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0].time, "7am");
    assert_eq!(alarms[0].date.as_deref(), Some("someday"));
    assert_eq!(alarms[0].days, WeekdaySet::from_days([1]).unwrap());
}

#[test]
fn corrupt_boolean_column_is_invalid_data() {
    let conn = open_alarm_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO alarms (time, name, sound_enabled, vibration_enabled, snooze_enabled, is_enabled)
         VALUES ('07:00', 'Broken', 1, 1, 1, 7);",
        [],
    )
    .unwrap();

    let err = SqliteAlarmRepository::new(&conn).list_alarms().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn store_publishes_after_each_mutation() {
    let conn = open_alarm_db_in_memory().unwrap();
    let store = AlarmStore::open(SqliteAlarmRepository::new(&conn)).unwrap();
    let mut rx = store.watch();
    assert!(rx.borrow_and_update().is_empty());

    let first = store.insert(&Alarm::new(at(7, 30)).with_name("Wake")).unwrap();
    let second = store
        .insert(&Alarm::new(at(9, 0)).on_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()))
        .unwrap();
    assert!(rx.has_changed().unwrap());
    let ids: Vec<i64> = rx.borrow_and_update().iter().map(|alarm| alarm.id).collect();
    assert_eq!(ids, vec![first, second]);

    store.set_enabled(first, false).unwrap();
    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.len(), 2);
    assert!(!snapshot[0].is_enabled);

    let mut renamed = snapshot[1].clone();
    renamed.name = "Dentist".to_string();
    store.update(&renamed).unwrap();
    assert_eq!(store.snapshot()[1].name, "Dentist");

    store.delete(first).unwrap();
    store.delete(second).unwrap();
    assert!(rx.borrow_and_update().is_empty());
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn failed_mutation_publishes_nothing() {
    let conn = open_alarm_db_in_memory().unwrap();
    let store = AlarmStore::open(SqliteAlarmRepository::new(&conn)).unwrap();
    let mut rx = store.watch();
    rx.borrow_and_update();

    let err = store.delete(99).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: RecordKind::Alarm,
            id: 99
        }
    ));

    let mut ghost = Alarm::new(at(8, 0));
    ghost.id = 99;
    assert!(store.update(&ghost).is_err());
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn date_and_weekdays_together_are_rejected_on_write() {
    let conn = open_alarm_db_in_memory().unwrap();
    let store = AlarmStore::open(SqliteAlarmRepository::new(&conn)).unwrap();

    let mut alarm = Alarm::new(at(7, 0)).repeating(WeekdaySet::WEEKENDS);
    alarm.date = Some("2026-10-24".to_string());
    assert!(matches!(
        store.insert(&alarm).unwrap_err(),
        RepoError::Validation(ValidationError::ConflictingRecurrence)
    ));
}

#[test]
fn legacy_conflicting_row_can_still_be_toggled() {
    let conn = open_alarm_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO alarms (time, name, selected_days, sound_enabled, vibration_enabled, snooze_enabled, date)
         VALUES ('07:00', 'Both', '0,6', 1, 1, 1, '2026-10-24');",
        [],
    )
    .unwrap();
    let store = AlarmStore::open(SqliteAlarmRepository::new(&conn)).unwrap();
    let id = store.snapshot()[0].id;

    store.set_enabled(id, false).unwrap();
    let alarm = store.get(id).unwrap().unwrap();
    assert!(!alarm.is_enabled);
    assert!(alarm.has_conflicting_recurrence());
}
