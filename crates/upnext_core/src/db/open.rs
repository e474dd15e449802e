//! Connection bootstrap utilities for the store databases.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for either store.
//! - Configure pragmas and apply the store's schema before returning.
//!
//! # Invariants
//! - Returned connections have their schema at the latest version.

use super::migrations::{apply_migrations, Schema, ALARM_SCHEMA, REMINDER_SCHEMA};
use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) the alarm database file.
pub fn open_alarm_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_schema(Connection::open(path), &ALARM_SCHEMA, "file")
}

/// Opens an empty in-memory alarm database.
pub fn open_alarm_db_in_memory() -> DbResult<Connection> {
    open_with_schema(Connection::open_in_memory(), &ALARM_SCHEMA, "memory")
}

/// Opens (or creates) the reminder database file.
///
/// An older reminder schema is dropped and rebuilt.
pub fn open_reminder_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with_schema(Connection::open(path), &REMINDER_SCHEMA, "file")
}

/// Opens an empty in-memory reminder database.
pub fn open_reminder_db_in_memory() -> DbResult<Connection> {
    open_with_schema(Connection::open_in_memory(), &REMINDER_SCHEMA, "memory")
}

fn open_with_schema(
    opened: rusqlite::Result<Connection>,
    schema: &Schema,
    mode: &str,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start schema={} mode={}",
        schema.name, mode
    );

    let mut conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error schema={} mode={} duration_ms={} error_code=db_open_failed error={}",
                schema.name,
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn, schema) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok schema={} mode={} duration_ms={}",
                schema.name,
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error schema={} mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                schema.name,
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, schema: &Schema) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn, schema)?;
    Ok(())
}
