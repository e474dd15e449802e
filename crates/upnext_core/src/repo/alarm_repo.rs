//! Alarm repository contract and SQLite implementation.
//!
//! # Invariants
//! - `create_alarm` ignores the record's `id` and returns the assigned one.
//! - Listing order is `id ASC`.
//! - `set_enabled` bypasses record validation so legacy rows stay togglable.
//! - Weekdays persist as a comma-joined list; unknown tokens are dropped
//!   on read.

use crate::model::alarm::{Alarm, AlarmId};
use crate::repo::{bool_to_int, int_to_bool, RecordKind, RepoError, RepoResult};
use crate::schedule::weekday::WeekdaySet;
use rusqlite::{params, Connection, Row};

const ALARM_SELECT_SQL: &str = "SELECT
    id,
    time,
    name,
    selected_days,
    sound_enabled,
    vibration_enabled,
    snooze_enabled,
    date,
    is_enabled
FROM alarms";

/// Repository interface for alarm CRUD operations.
pub trait AlarmRepository {
    fn create_alarm(&self, alarm: &Alarm) -> RepoResult<AlarmId>;
    fn update_alarm(&self, alarm: &Alarm) -> RepoResult<()>;
    fn get_alarm(&self, id: AlarmId) -> RepoResult<Option<Alarm>>;
    fn list_alarms(&self) -> RepoResult<Vec<Alarm>>;
    fn delete_alarm(&self, id: AlarmId) -> RepoResult<()>;
    /// Flips only the enabled flag; other fields are left as stored.
    fn set_enabled(&self, id: AlarmId, is_enabled: bool) -> RepoResult<()>;
}

/// SQLite-backed alarm repository.
pub struct SqliteAlarmRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAlarmRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AlarmRepository for SqliteAlarmRepository<'_> {
    fn create_alarm(&self, alarm: &Alarm) -> RepoResult<AlarmId> {
        alarm.validate()?;

        self.conn.execute(
            "INSERT INTO alarms (
                time,
                name,
                selected_days,
                sound_enabled,
                vibration_enabled,
                snooze_enabled,
                date,
                is_enabled
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                alarm.time.trim(),
                alarm.name.as_str(),
                alarm.days.to_storage(),
                bool_to_int(alarm.sound_enabled),
                bool_to_int(alarm.vibration_enabled),
                bool_to_int(alarm.snooze_enabled),
                alarm.date_text(),
                bool_to_int(alarm.is_enabled),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_alarm(&self, alarm: &Alarm) -> RepoResult<()> {
        alarm.validate()?;

        let changed = self.conn.execute(
            "UPDATE alarms
             SET
                time = ?1,
                name = ?2,
                selected_days = ?3,
                sound_enabled = ?4,
                vibration_enabled = ?5,
                snooze_enabled = ?6,
                date = ?7,
                is_enabled = ?8
             WHERE id = ?9;",
            params![
                alarm.time.trim(),
                alarm.name.as_str(),
                alarm.days.to_storage(),
                bool_to_int(alarm.sound_enabled),
                bool_to_int(alarm.vibration_enabled),
                bool_to_int(alarm.snooze_enabled),
                alarm.date_text(),
                bool_to_int(alarm.is_enabled),
                alarm.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Alarm,
                id: alarm.id,
            });
        }

        Ok(())
    }

    fn get_alarm(&self, id: AlarmId) -> RepoResult<Option<Alarm>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ALARM_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_alarm_row(row)?));
        }

        Ok(None)
    }

    fn list_alarms(&self) -> RepoResult<Vec<Alarm>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ALARM_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut alarms = Vec::new();

        while let Some(row) = rows.next()? {
            alarms.push(parse_alarm_row(row)?);
        }

        Ok(alarms)
    }

    fn delete_alarm(&self, id: AlarmId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM alarms WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Alarm,
                id,
            });
        }

        Ok(())
    }

    fn set_enabled(&self, id: AlarmId, is_enabled: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE alarms SET is_enabled = ?1 WHERE id = ?2;",
            params![bool_to_int(is_enabled), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Alarm,
                id,
            });
        }

        Ok(())
    }
}

fn parse_alarm_row(row: &Row<'_>) -> RepoResult<Alarm> {
    let days_text: String = row.get("selected_days")?;

    Ok(Alarm {
        id: row.get("id")?,
        time: row.get("time")?,
        name: row.get("name")?,
        days: WeekdaySet::parse_lenient(&days_text),
        date: row.get("date")?,
        sound_enabled: int_to_bool(row.get("sound_enabled")?, "alarms.sound_enabled")?,
        vibration_enabled: int_to_bool(row.get("vibration_enabled")?, "alarms.vibration_enabled")?,
        snooze_enabled: int_to_bool(row.get("snooze_enabled")?, "alarms.snooze_enabled")?,
        is_enabled: int_to_bool(row.get("is_enabled")?, "alarms.is_enabled")?,
    })
}
