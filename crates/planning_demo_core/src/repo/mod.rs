//! Repository layer over the planning schema.
//!
//! # Responsibility
//! - `planning_repo`: write-side contract used by the generator.
//! - `report_repo`: read-side queries used by the persona reports.
//!
//! # Invariants
//! - SQL text lives only in this layer (plus schema migrations).
//! - Report queries never write.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod planning_repo;
pub mod report_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for planning reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Persisted data cannot be mapped back to a read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted planning data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
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
        Self::Db(DbError::Sqlite(value))
    }
}
