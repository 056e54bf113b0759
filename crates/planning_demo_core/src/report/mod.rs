//! Persona dashboards rendered from a generated planning database.
//!
//! # Responsibility
//! - Own the read-only connection for the lifetime of one analyzer.
//! - Render each persona view as console text into any writer.
//!
//! # Invariants
//! - Rendering never writes to the database.
//! - Date-relative output (urgency, recent activity) is computed against
//!   the analyzer's `today`, never the system clock.

mod coordinator;
mod dependency;
mod executive;
pub mod format;
mod personal;
mod resource;

pub use coordinator::CoordinatorRequest;
pub use dependency::DependencyRequest;
pub use executive::ExecutiveRequest;
pub use personal::PersonalRequest;
pub use resource::BalancerRequest;

use crate::db::{open_db_read_only, DbError};
use crate::repo::report_repo::ReportQueries;
use crate::repo::RepoError;
use chrono::NaiveDate;
use log::{error, info};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug)]
pub enum ReportError {
    /// No database at the configured path; generation has not run yet.
    DatabaseNotFound(PathBuf),
    Db(DbError),
    Repo(RepoError),
    Io(io::Error),
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseNotFound(path) => {
                write!(f, "Database file not found: {}", path.display())
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to write report: {err}"),
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DatabaseNotFound(_) => None,
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ReportError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::NotFound(path) => Self::DatabaseNotFound(path),
            other => Self::Db(other),
        }
    }
}

impl From<RepoError> for ReportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ReportError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

impl From<io::Error> for ReportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

const TAKEAWAYS: [&str; 5] = [
    "Same data, completely different interfaces per persona",
    "Every view includes actionable next steps",
    "Context-aware actions based on user role and current state",
    "Real-time collaboration and communication built-in",
    "AI-powered suggestions and automation capabilities",
];

/// Renders persona dashboards over one planning database.
pub struct PlanningAnalyzer {
    conn: Connection,
    db_path: Option<PathBuf>,
    today: NaiveDate,
}

impl PlanningAnalyzer {
    /// Opens the database at `path` read-only.
    ///
    /// # Errors
    /// - [`ReportError::DatabaseNotFound`] when no file exists at `path`.
    /// - [`ReportError::Db`] when the file cannot be opened or its schema
    ///   version does not match.
    pub fn open(path: impl AsRef<Path>, today: NaiveDate) -> ReportResult<Self> {
        let path = path.as_ref();
        let conn = open_db_read_only(path)?;
        info!(
            "event=analyzer_open module=report status=ok path={} today={today}",
            path.display()
        );
        Ok(Self {
            conn,
            db_path: Some(path.to_path_buf()),
            today,
        })
    }

    /// Wraps an already-open connection, e.g. an in-memory database.
    pub fn from_connection(conn: Connection, today: NaiveDate) -> Self {
        Self {
            conn,
            db_path: None,
            today,
        }
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn queries(&self) -> ReportQueries<'_> {
        ReportQueries::new(&self.conn)
    }

    pub fn executive_dashboard(
        &self,
        out: &mut impl Write,
        request: &ExecutiveRequest,
    ) -> ReportResult<()> {
        self.logged("executive", || {
            executive::render(&self.queries(), request, out)
        })
    }

    pub fn dependency_detective(
        &self,
        out: &mut impl Write,
        request: &DependencyRequest,
    ) -> ReportResult<()> {
        self.logged("dependency", || {
            dependency::render(&self.queries(), request, out)
        })
    }

    pub fn resource_balancer(
        &self,
        out: &mut impl Write,
        request: &BalancerRequest,
    ) -> ReportResult<()> {
        self.logged("resource", || resource::render(&self.queries(), request, out))
    }

    pub fn personal_assistant(
        &self,
        out: &mut impl Write,
        request: &PersonalRequest,
    ) -> ReportResult<()> {
        self.logged("personal", || {
            personal::render(&self.queries(), self.today, request, out)
        })
    }

    pub fn cross_functional_coordinator(
        &self,
        out: &mut impl Write,
        request: &CoordinatorRequest,
    ) -> ReportResult<()> {
        self.logged("coordinator", || {
            coordinator::render(&self.queries(), self.today, request, out)
        })
    }

    /// Every persona with its default request, then the closing notes.
    pub fn run_all_demos(&self, out: &mut impl Write) -> ReportResult<()> {
        writeln!(out, "🎭 === RUNNING ALL DEMO SCENARIOS ===")?;
        writeln!(
            out,
            "Demonstrating different personas and their action-oriented views\n"
        )?;

        self.executive_dashboard(out, &ExecutiveRequest::default())?;
        self.dependency_detective(out, &DependencyRequest::default())?;
        self.resource_balancer(out, &BalancerRequest::default())?;
        self.personal_assistant(out, &PersonalRequest::default())?;
        self.cross_functional_coordinator(out, &CoordinatorRequest::default())?;

        writeln!(out, "\n{}", "=".repeat(70))?;
        writeln!(out, "🎯 DEMO COMPLETE! Key Takeaways:")?;
        for takeaway in TAKEAWAYS {
            writeln!(out, "  • {takeaway}")?;
        }
        writeln!(out, "\n💡 This demonstrates the power of generative UI:")?;
        writeln!(out, "  Instead of one-size-fits-all dashboards, each user gets")?;
        writeln!(out, "  a personalized command center designed for their specific")?;
        writeln!(out, "  role, responsibilities, and current context!")?;
        Ok(())
    }

    fn logged(
        &self,
        persona: &'static str,
        render: impl FnOnce() -> ReportResult<()>,
    ) -> ReportResult<()> {
        match render() {
            Ok(()) => {
                info!("event=persona_render module=report status=ok persona={persona}");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=persona_render module=report status=error persona={persona} error={err}"
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlanningAnalyzer, ReportError};
    use crate::db::open_db_in_memory;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn missing_file_is_database_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite3");

        let err = PlanningAnalyzer::open(&path, today()).err().unwrap();
        assert!(matches!(&err, ReportError::DatabaseNotFound(p) if p == &path));
        assert!(err.to_string().starts_with("Database file not found:"));
    }

    #[test]
    fn empty_database_renders_every_persona() {
        let analyzer = PlanningAnalyzer::from_connection(open_db_in_memory().unwrap(), today());
        let mut out = Vec::new();
        analyzer.run_all_demos(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total Projects: 0 (0 active)"));
        assert!(text.contains("No critical blockers found!"));
        assert!(text.contains("Project 'Mobile App 2.0' not found"));
        assert!(text.contains("No overloaded users found!"));
        assert!(text.contains("No developer users found"));
        assert!(text.contains("Project 'Customer Portal' not found"));
        assert!(text.contains("DEMO COMPLETE!"));
    }
}
