//! Reminder repository contract and SQLite implementation.
//!
//! # Invariants
//! - `due_at` and `created_at` persist as wall-clock epoch milliseconds.
//! - Listings are ordered by `due_at ASC, id ASC`; completed listings by
//!   `due_at DESC, id ASC`.
//! - `update_reminder` never rewrites `created_at`.

use crate::clock::{from_wall_clock_millis, wall_clock_millis};
use crate::model::reminder::{Priority, Reminder, ReminderId};
use crate::repo::{bool_to_int, int_to_bool, RecordKind, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    due_at,
    is_completed,
    priority,
    category,
    created_at
FROM reminders";

/// Listing filter for reminder queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderListQuery {
    /// Every reminder.
    #[default]
    All,
    /// Not completed and due at or after the given instant.
    PendingAt(NaiveDateTime),
}

/// Repository interface for reminder operations.
pub trait ReminderRepository {
    fn create_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId>;
    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()>;
    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>>;
    fn list_reminders(&self, query: ReminderListQuery) -> RepoResult<Vec<Reminder>>;
    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()>;
    fn set_completed(&self, id: ReminderId, is_completed: bool) -> RepoResult<()>;
    fn list_completed(&self) -> RepoResult<Vec<Reminder>>;
    /// Deletes every completed reminder and returns how many were removed.
    fn delete_completed(&self) -> RepoResult<usize>;
}

/// SQLite-backed reminder repository.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_reminders(&self, sql: &str, bind: Option<i64>) -> RepoResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match bind {
            Some(value) => stmt.query([value])?,
            None => stmt.query([])?,
        };
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn create_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId> {
        reminder.validate()?;

        self.conn.execute(
            "INSERT INTO reminders (
                title,
                description,
                due_at,
                is_completed,
                priority,
                category,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                reminder.title.as_str(),
                reminder.description.as_str(),
                wall_clock_millis(reminder.due_at),
                bool_to_int(reminder.is_completed),
                reminder.priority.as_str(),
                reminder.category.as_str(),
                wall_clock_millis(reminder.created_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_reminder(&self, reminder: &Reminder) -> RepoResult<()> {
        reminder.validate()?;

        let changed = self.conn.execute(
            "UPDATE reminders
             SET
                title = ?1,
                description = ?2,
                due_at = ?3,
                is_completed = ?4,
                priority = ?5,
                category = ?6
             WHERE id = ?7;",
            params![
                reminder.title.as_str(),
                reminder.description.as_str(),
                wall_clock_millis(reminder.due_at),
                bool_to_int(reminder.is_completed),
                reminder.priority.as_str(),
                reminder.category.as_str(),
                reminder.id,
            ],
        )?;

        if changed == 0 {
            return Err(not_found(reminder.id));
        }

        Ok(())
    }

    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        let mut reminders =
            self.query_reminders(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"), Some(id))?;
        Ok(reminders.pop())
    }

    fn list_reminders(&self, query: ReminderListQuery) -> RepoResult<Vec<Reminder>> {
        match query {
            ReminderListQuery::All => self.query_reminders(
                &format!("{REMINDER_SELECT_SQL} ORDER BY due_at ASC, id ASC;"),
                None,
            ),
            ReminderListQuery::PendingAt(now) => self.query_reminders(
                &format!(
                    "{REMINDER_SELECT_SQL}
                     WHERE due_at >= ?1 AND is_completed = 0
                     ORDER BY due_at ASC, id ASC;"
                ),
                Some(wall_clock_millis(now)),
            ),
        }
    }

    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    fn set_completed(&self, id: ReminderId, is_completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reminders SET is_completed = ?1 WHERE id = ?2;",
            params![bool_to_int(is_completed), id],
        )?;

        if changed == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    fn list_completed(&self) -> RepoResult<Vec<Reminder>> {
        self.query_reminders(
            &format!("{REMINDER_SELECT_SQL} WHERE is_completed = 1 ORDER BY due_at DESC, id ASC;"),
            None,
        )
    }

    fn delete_completed(&self) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM reminders WHERE is_completed = 1;", [])?;
        Ok(removed)
    }
}

fn not_found(id: ReminderId) -> RepoError {
    RepoError::NotFound {
        kind: RecordKind::Reminder,
        id,
    }
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in reminders.priority"
        ))
    })?;

    Ok(Reminder {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_at: parse_millis(row.get("due_at")?, "reminders.due_at")?,
        is_completed: int_to_bool(row.get("is_completed")?, "reminders.is_completed")?,
        priority,
        category: row.get("category")?,
        created_at: parse_millis(row.get("created_at")?, "reminders.created_at")?,
    })
}

fn parse_millis(value: i64, column: &str) -> RepoResult<NaiveDateTime> {
    from_wall_clock_millis(value).ok_or_else(|| {
        RepoError::InvalidData(format!("out-of-range timestamp `{value}` in {column}"))
    })
}
