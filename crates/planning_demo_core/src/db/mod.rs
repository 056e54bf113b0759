//! SQLite storage bootstrap for the planning demo schema.
//!
//! # Responsibility
//! - Open writable (generator) and read-only (renderer) connections.
//! - Apply the planning schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - The renderer never opens a database whose schema version differs from
//!   the one this binary writes.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_read_only, open_fresh_db};

/// Every table created by the schema, in creation (parent-first) order.
pub const PLANNING_TABLES: [&str; 14] = [
    "organizations",
    "departments",
    "users",
    "teams",
    "team_members",
    "projects",
    "milestones",
    "tasks",
    "task_dependencies",
    "task_comments",
    "task_tags",
    "work_logs",
    "resource_requests",
    "notifications",
];

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    /// Database file does not exist; the generator has not been run.
    NotFound(PathBuf),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Read-only open found a schema other than the latest one.
    SchemaMismatch {
        db_version: u32,
        expected: u32,
    },
    UnknownTable(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::NotFound(path) => write!(f, "Database file not found: {}", path.display()),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::SchemaMismatch {
                db_version,
                expected,
            } => write!(
                f,
                "database schema version {db_version} does not match expected {expected}"
            ),
            Self::UnknownTable(name) => write!(f, "unknown planning table `{name}`"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Counts rows of one of the [`PLANNING_TABLES`].
///
/// Table names are interpolated into SQL, so anything outside the known list
/// is rejected with [`DbError::UnknownTable`].
pub fn table_row_count(conn: &rusqlite::Connection, table: &str) -> DbResult<i64> {
    if !PLANNING_TABLES.contains(&table) {
        return Err(DbError::UnknownTable(table.to_string()));
    }
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{open_db_in_memory, table_row_count, DbError, PLANNING_TABLES};

    #[test]
    fn row_count_is_zero_on_fresh_schema() {
        let conn = open_db_in_memory().unwrap();
        for table in PLANNING_TABLES {
            assert_eq!(table_row_count(&conn, table).unwrap(), 0, "{table}");
        }
    }

    #[test]
    fn row_count_rejects_unknown_table() {
        let conn = open_db_in_memory().unwrap();
        let err = table_row_count(&conn, "sqlite_master; DROP TABLE users").unwrap_err();
        assert!(matches!(err, DbError::UnknownTable(_)));
    }
}
