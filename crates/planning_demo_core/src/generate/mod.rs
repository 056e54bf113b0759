//! Seeded synthetic dataset generation.
//!
//! # Responsibility
//! - Run the fourteen population steps in dependency order.
//! - Keep every random draw on one seeded stream and every timestamp on the
//!   configured reference date.
//!
//! # Invariants
//! - Same config (seed and reference date included) produces identical rows.
//! - All steps run inside one transaction; a failed run leaves no rows.
//! - Ids are assigned in generation order starting at 1 per table.

use crate::config::{ConfigError, GeneratorConfig};
use crate::repo::planning_repo::{PlanningWriter, SqlitePlanningWriter};
use crate::repo::RepoError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, error, info};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

mod activity;
pub mod fake;
mod org;
pub mod rng;
mod work;

pub use activity::{
    generate_notifications, generate_resource_requests, generate_task_comments,
    generate_task_dependencies, generate_task_tags, generate_work_logs, TagMatcher,
};
pub use org::{
    generate_departments, generate_organizations, generate_team_members, generate_teams,
    generate_users,
};
pub use work::{generate_milestones, generate_projects, generate_tasks};

use rng::DemoRng;

pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug)]
pub enum GenerateError {
    /// A random pick was asked for from an empty pool.
    EmptyPool(&'static str),
    /// A weight table could not build a distribution.
    InvalidWeights(&'static str, String),
    /// A tag rule keyword set does not compile to a matcher.
    InvalidTagRule(String),
    Config(ConfigError),
    Repo(RepoError),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPool(pool) => write!(f, "cannot pick from empty pool `{pool}`"),
            Self::InvalidWeights(pool, reason) => {
                write!(f, "invalid weights for `{pool}`: {reason}")
            }
            Self::InvalidTagRule(reason) => write!(f, "invalid tag rule: {reason}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GenerateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<RepoError> for GenerateError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for GenerateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Rows inserted per table by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    counts: BTreeMap<&'static str, usize>,
}

impl GenerationSummary {
    fn record(&mut self, table: &'static str, rows: usize) {
        debug!(
            "event=generate_step module=generate status=ok table={} rows={}",
            table, rows
        );
        *self.counts.entry(table).or_insert(0) += rows;
    }

    pub fn count(&self, table: &str) -> usize {
        self.counts.get(table).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(table, rows)| (*table, *rows))
    }
}

/// Builds the whole demo dataset from one validated config.
pub struct DemoGenerator {
    config: GeneratorConfig,
}

impl DemoGenerator {
    pub fn new(config: GeneratorConfig) -> GenerateResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Populates a migrated, empty database in a single transaction.
    ///
    /// # Side effects
    /// - Emits `generate` start/ok/error events with row totals.
    pub fn run(&self, conn: &mut Connection) -> GenerateResult<GenerationSummary> {
        let started_at = Instant::now();
        info!(
            "event=generate module=generate status=start seed={} reference_date={}",
            self.config.seed, self.config.reference_date
        );

        let result = self.run_in_transaction(conn);
        match &result {
            Ok(summary) => info!(
                "event=generate module=generate status=ok rows={} duration_ms={}",
                summary.total(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=generate module=generate status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn run_in_transaction(&self, conn: &mut Connection) -> GenerateResult<GenerationSummary> {
        let tx = conn.transaction()?;
        let summary = self.populate(&SqlitePlanningWriter::new(&tx))?;
        tx.commit()?;
        Ok(summary)
    }

    /// Runs every step against `writer` without transaction handling.
    pub fn populate<W: PlanningWriter>(&self, writer: &W) -> GenerateResult<GenerationSummary> {
        let config = &self.config;
        let mut rng = DemoRng::seeded(config.seed);
        let mut summary = GenerationSummary::default();

        let organization = generate_organizations(config, writer)?;
        summary.record("organizations", 1);

        let departments = generate_departments(config, writer, &organization)?;
        summary.record("departments", departments.len());

        let users = generate_users(config, &mut rng, writer, &organization, &departments)?;
        summary.record("users", users.len());

        let teams = generate_teams(config, &mut rng, writer, &departments, &users)?;
        summary.record("teams", teams.len());

        let members = generate_team_members(config, &mut rng, writer, &teams, &users)?;
        summary.record("team_members", members.len());

        let projects = generate_projects(config, &mut rng, writer, &organization)?;
        summary.record("projects", projects.len());

        let milestones = generate_milestones(config, &mut rng, writer, &projects)?;
        summary.record("milestones", milestones.len());

        let tasks = generate_tasks(config, &mut rng, writer, &milestones, &users)?;
        summary.record("tasks", tasks.len());

        let dependencies = generate_task_dependencies(config, &mut rng, writer, &tasks)?;
        summary.record("task_dependencies", dependencies.len());

        let comments = generate_task_comments(config, &mut rng, writer, &tasks, &users)?;
        summary.record("task_comments", comments);

        let tags = generate_task_tags(config, writer, &tasks)?;
        summary.record("task_tags", tags);

        let logs = generate_work_logs(config, &mut rng, writer, &tasks, &users)?;
        summary.record("work_logs", logs);

        let requests = generate_resource_requests(config, &mut rng, writer, &users, &projects)?;
        summary.record("resource_requests", requests);

        let notifications = generate_notifications(
            config,
            &mut rng,
            writer,
            &users,
            &tasks,
            &projects,
            &milestones,
        )?;
        summary.record("notifications", notifications);

        Ok(summary)
    }
}

/// Hour of the reference date treated as "now" for created rows.
const GENERATED_AT_HOUR: u32 = 8;

pub(crate) fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
}

pub(crate) fn generated_at(config: &GeneratorConfig) -> NaiveDateTime {
    at_hour(config.reference_date, GENERATED_AT_HOUR)
}

pub(crate) fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date - Duration::days(days)
}

pub(crate) fn days_after(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Money and hours are stored with two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 1-based id for the `index`-th generated row.
pub(crate) fn row_id(index: usize) -> crate::model::RowId {
    index as crate::model::RowId + 1
}

#[cfg(test)]
mod tests {
    use super::{at_hour, round2, row_id, DemoGenerator, GenerateError};
    use crate::config::{ConfigError, GeneratorConfig};
    use crate::db::{open_db_in_memory, table_row_count};
    use chrono::NaiveDate;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn helpers_round_and_number_rows() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(row_id(0), 1);
        assert_eq!(at_hour(reference(), 17).to_string(), "2026-03-02 17:00:00");
    }

    #[test]
    fn invalid_config_is_rejected_before_any_write() {
        let mut config = GeneratorConfig::with_reference_date(1, reference());
        config.user_total += 1;
        let err = DemoGenerator::new(config).err().unwrap();
        assert!(matches!(err, GenerateError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn summary_matches_table_counts() {
        let mut conn = open_db_in_memory().unwrap();
        let generator =
            DemoGenerator::new(GeneratorConfig::with_reference_date(11, reference())).unwrap();
        let summary = generator.run(&mut conn).unwrap();

        for (table, rows) in summary.iter() {
            assert_eq!(table_row_count(&conn, table).unwrap() as usize, rows, "{table}");
        }
        assert_eq!(summary.count("users"), 150);
        assert_eq!(summary.count("organizations"), 1);
    }
}
