//! Repository layer over the organization tables.
//!
//! # Responsibility
//! - Define the data-access contract used by the service layer.
//! - Keep every SQL statement and row decoding inside this module.
//!
//! # Invariants
//! - All values reach SQLite as bound parameters, never via string formatting.
//! - Updates that touch no row report `RepoError::NotFound`.
//! - Persisted rows that cannot be decoded surface as `InvalidData`.

pub mod org_repo;
mod schema_check;

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure raised by repository reads and writes.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or statement failure from SQLite.
    Db(DbError),
    /// The store rejected a write (foreign key, CHECK, NOT NULL).
    ConstraintViolation(rusqlite::Error),
    /// Targeted row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Connection schema is not at the expected version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Stored data cannot be turned into a domain record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(err) => write!(f, "store constraint violated: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "repository requires column `{column}` in table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ConstraintViolation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if matches!(
            value.sqlite_error_code(),
            Some(ErrorCode::ConstraintViolation)
        ) {
            Self::ConstraintViolation(value)
        } else {
            Self::Db(DbError::Sqlite(value))
        }
    }
}
