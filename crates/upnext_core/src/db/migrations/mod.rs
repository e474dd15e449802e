//! SQLite schema registries and migration executor.
//!
//! # Responsibility
//! - Register each store's schema scripts in strictly increasing order.
//! - Apply pending scripts atomically, or rebuild when a store opts into
//!   destructive fallback.
//!
//! # Invariants
//! - `version` values must remain monotonic within a schema.
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - The alarm schema only ever grows; existing rows are preserved and new
//!   columns carry defaults.
//! - The reminder schema has no upgrade path; older databases are dropped
//!   and recreated.
//! - A database newer than the binary is never touched.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    version: u32,
    sql: &'static str,
}

/// How a schema reaches its latest version from an older one.
#[derive(Debug, Clone, Copy)]
pub enum UpgradePolicy {
    /// Apply every registered script above the current version in order.
    Incremental,
    /// Run `drop_sql`, then rebuild from scratch. Existing data is lost.
    RecreateOnMismatch { drop_sql: &'static str },
}

/// Versioned schema of one store database.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    migrations: &'static [Migration],
    policy: UpgradePolicy,
}

impl Schema {
    /// Returns the latest migration version known by this binary.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map_or(0, |migration| migration.version)
    }
}

pub const ALARM_SCHEMA: Schema = Schema {
    name: "alarms",
    migrations: &[
        Migration {
            version: 1,
            sql: include_str!("alarms/0001_init.sql"),
        },
        Migration {
            version: 2,
            sql: include_str!("alarms/0002_alarm_date.sql"),
        },
        Migration {
            version: 3,
            sql: include_str!("alarms/0003_alarm_enabled.sql"),
        },
    ],
    policy: UpgradePolicy::Incremental,
};

pub const REMINDER_SCHEMA: Schema = Schema {
    name: "reminders",
    migrations: &[Migration {
        version: 2,
        sql: include_str!("reminders/0002_reminders.sql"),
    }],
    policy: UpgradePolicy::RecreateOnMismatch {
        drop_sql: include_str!("reminders/drop_all.sql"),
    },
};

/// Brings `conn` to the latest version of `schema`.
pub fn apply_migrations(conn: &mut Connection, schema: &Schema) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = schema.latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let start_after = match schema.policy {
        UpgradePolicy::Incremental => current_version,
        UpgradePolicy::RecreateOnMismatch { drop_sql } => {
            if current_version > 0 {
                warn!(
                    "event=db_migrate module=db status=recreate schema={} from_version={} to_version={}",
                    schema.name, current_version, latest
                );
                tx.execute_batch(drop_sql)?;
            }
            0
        }
    };

    for migration in schema.migrations {
        if migration.version <= start_after {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok schema={} from_version={} to_version={}",
        schema.name, current_version, latest
    );
    Ok(())
}

/// Reads `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
