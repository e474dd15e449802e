//! Repository contracts and SQLite implementations for both stores.
//!
//! # Responsibility
//! - Define CRUD contracts consumed by the observed stores.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths tolerate malformed alarm time/date text but reject
//!   structurally corrupt rows as `InvalidData`.
//! - Mutations addressing a missing id return `NotFound`.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod alarm_repo;
pub mod reminder_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which record table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Alarm,
    Reminder,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alarm => f.write_str("alarm"),
            Self::Reminder => f.write_str("reminder"),
        }
    }
}

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { kind: RecordKind, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
