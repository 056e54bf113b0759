//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory connections with migrations applied.
//! - Reset the generator's target file before regeneration.
//! - Open the renderer's connection read-only after schema checks.
//!
//! # Invariants
//! - Writable connections have `foreign_keys=ON` and the latest schema.
//! - Read-only opens never create a file.

use super::migrations::{apply_migrations, current_user_version, latest_version};
use super::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a SQLite database file and applies pending migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=file path={}",
        path.display()
    );

    let result = Connection::open(path)
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("file", started_at, &result);
    result
}

/// Opens an in-memory database with the full schema applied.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(|mut conn| bootstrap_connection(&mut conn).map(|()| conn));
    log_open_outcome("memory", started_at, &result);
    result
}

/// Recreates the database file at `path` from scratch.
///
/// Missing parent directories are created. An existing database file and
/// its `-wal`/`-shm` siblings are removed first, so every generator run
/// starts from an empty schema.
pub fn open_fresh_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    for candidate in database_files(path) {
        if candidate.exists() {
            warn!(
                "event=db_reset module=db status=ok removed={}",
                candidate.display()
            );
            std::fs::remove_file(&candidate)?;
        }
    }

    open_db(path)
}

/// Opens an existing database for reporting without write access.
///
/// # Errors
/// - [`DbError::NotFound`] when no file exists at `path`.
/// - [`DbError::SchemaMismatch`] when the file was not written by this
///   schema version.
pub fn open_db_read_only(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    if !path.is_file() {
        error!(
            "event=db_open module=db status=error mode=read_only error_code=db_not_found path={}",
            path.display()
        );
        return Err(DbError::NotFound(path.to_path_buf()));
    }

    let started_at = Instant::now();
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    let db_version = current_user_version(&conn)?;
    let expected = latest_version();
    if db_version != expected {
        error!(
            "event=db_open module=db status=error mode=read_only error_code=schema_mismatch db_version={} expected={}",
            db_version, expected
        );
        return Err(DbError::SchemaMismatch {
            db_version,
            expected,
        });
    }

    info!(
        "event=db_open module=db status=ok mode=read_only duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

fn log_open_outcome(mode: &str, started_at: Instant, result: &DbResult<Connection>) {
    match result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={} duration_ms={}",
            mode,
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={} duration_ms={} error={}",
            mode,
            started_at.elapsed().as_millis(),
            err
        ),
    }
}

fn database_files(path: &Path) -> [PathBuf; 3] {
    let with_suffix = |suffix: &str| {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    };
    [path.to_path_buf(), with_suffix("-wal"), with_suffix("-shm")]
}
