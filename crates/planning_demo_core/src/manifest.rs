//! JSON manifest describing one generated dataset.

use crate::db::{table_row_count, DbError, PLANNING_TABLES};
use crate::validate::ScenarioReport;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug)]
pub enum ManifestError {
    Db(DbError),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for ManifestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write manifest `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode manifest: {err}"),
        }
    }
}

impl Error for ManifestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<DbError> for ManifestError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for ManifestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataManifest {
    /// Wall-clock time of the run, RFC 3339.
    pub generated_at: String,
    pub seed: u64,
    pub reference_date: NaiveDate,
    pub counts: BTreeMap<String, i64>,
    pub scenarios: ScenarioReport,
    pub scenarios_validated: bool,
}

/// Collects row counts for every planning table.
pub fn build_manifest(
    conn: &Connection,
    seed: u64,
    reference_date: NaiveDate,
    report: &ScenarioReport,
    generated_at: DateTime<Local>,
) -> ManifestResult<DataManifest> {
    let mut counts = BTreeMap::new();
    for table in PLANNING_TABLES {
        counts.insert(table.to_string(), table_row_count(conn, table)?);
    }
    Ok(DataManifest {
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
        seed,
        reference_date,
        counts,
        scenarios: *report,
        scenarios_validated: report.is_valid(),
    })
}

/// Writes the manifest as pretty JSON, creating parent directories.
pub fn write_manifest(
    conn: &Connection,
    path: &Path,
    seed: u64,
    reference_date: NaiveDate,
    report: &ScenarioReport,
) -> ManifestResult<DataManifest> {
    let manifest = build_manifest(conn, seed, reference_date, report, Local::now())?;
    let mut encoded = serde_json::to_string_pretty(&manifest)?;
    encoded.push('\n');

    let io_error = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
    }
    std::fs::write(path, encoded).map_err(io_error)?;

    info!(
        "event=manifest_write module=manifest status=ok path={} scenarios_validated={}",
        path.display(),
        manifest.scenarios_validated
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::{build_manifest, write_manifest};
    use crate::db::{open_db_in_memory, PLANNING_TABLES};
    use crate::validate::ScenarioReport;
    use chrono::{Local, NaiveDate, TimeZone};

    #[test]
    fn manifest_lists_every_table() {
        let conn = open_db_in_memory().unwrap();
        let generated_at = Local.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap();
        let manifest = build_manifest(
            &conn,
            42,
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            &ScenarioReport::default(),
            generated_at,
        )
        .unwrap();

        assert_eq!(manifest.counts.len(), PLANNING_TABLES.len());
        assert!(manifest.generated_at.starts_with("2026-03-02T10:30:00"));
        assert!(manifest.scenarios_validated);
    }

    #[test]
    fn write_creates_parent_directories() {
        let conn = open_db_in_memory().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data_manifest.json");

        write_manifest(
            &conn,
            &path,
            7,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            &ScenarioReport::default(),
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["reference_date"], "2026-01-15");
        assert_eq!(value["counts"]["users"], 0);
        assert_eq!(value["scenarios_validated"], true);
    }
}
