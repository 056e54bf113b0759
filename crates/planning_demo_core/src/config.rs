//! Generator distributions and runtime settings.
//!
//! # Responsibility
//! - Hold every knob of the synthetic dataset in one serde-friendly struct.
//! - Resolve process settings (paths, seed, clock, log level) from the
//!   environment.
//!
//! # Invariants
//! - A config that passes [`GeneratorConfig::validate`] never makes the
//!   generator fail on an empty pool or an invalid weight table.
//! - Role counts always sum to the configured user total.

use crate::model::activity::NotificationType;
use crate::model::org::{DepartmentType, Specialization, Timezone, UserRole};
use crate::model::project::{Priority, ProjectStatus};
use crate::model::task::{TaskStatus, TaskType};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "PLANNING_DEMO_DB_PATH";
pub const ENV_MANIFEST_PATH: &str = "PLANNING_DEMO_MANIFEST_PATH";
pub const ENV_LOG_DIR: &str = "PLANNING_DEMO_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "PLANNING_DEMO_LOG_LEVEL";
pub const ENV_SEED: &str = "PLANNING_DEMO_SEED";
pub const ENV_REFERENCE_DATE: &str = "PLANNING_DEMO_REFERENCE_DATE";
pub const ENV_CONFIG_PATH: &str = "PLANNING_DEMO_CONFIG";

pub const DEFAULT_DB_PATH: &str = "generated/planning_demo.sqlite3";
pub const DEFAULT_MANIFEST_PATH: &str = "generated/data_manifest.json";
pub const DEFAULT_LOG_SUBDIR: &str = "generated/logs";
pub const DEFAULT_SEED: u64 = 42;

/// Configuration errors. Never raised as panics.
#[derive(Debug)]
pub enum ConfigError {
    /// An environment variable holds an unparsable value.
    InvalidEnv { key: &'static str, value: String },
    /// The generator config breaks one of its invariants.
    Invalid(String),
    /// A config file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// A config file is not valid JSON for [`GeneratorConfig`].
    Parse { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEnv { key, value } => {
                write!(f, "invalid value `{value}` for environment variable {key}")
            }
            Self::Invalid(message) => write!(f, "invalid generator config: {message}"),
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSpec {
    pub name: String,
    pub kind: DepartmentType,
    /// Share of the user total placed in this department.
    pub weight: f64,
    pub specializations: Vec<Specialization>,
    pub team_count: usize,
    pub team_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub role: UserRole,
    pub count: u32,
    pub availability_hours: u32,
}

/// Forces the users at `user_indices` above 100% team allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadPattern {
    pub user_indices: Vec<usize>,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub name: String,
    pub code_name: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub risk_score: u8,
    #[serde(default)]
    pub client_facing: bool,
    #[serde(default)]
    pub compliance_required: bool,
    /// Random budget when absent.
    #[serde(default)]
    pub budget: Option<u32>,
    /// Random consumed ratio when absent.
    #[serde(default)]
    pub budget_consumed_ratio: Option<f64>,
}

/// Tags applied when any keyword appears in a task's title or description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
}

/// Full description of the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    /// Generation clock; every stored date derives from it.
    pub reference_date: NaiveDate,
    pub organization_name: String,
    pub email_domain: String,
    pub departments: Vec<DepartmentSpec>,
    pub user_total: u32,
    pub roles: Vec<RoleSpec>,
    pub timezones: Vec<(Timezone, f64)>,
    pub overload_patterns: Vec<OverloadPattern>,
    pub project_count: usize,
    pub project_templates: Vec<ProjectTemplate>,
    pub project_statuses: Vec<(ProjectStatus, f64)>,
    pub project_priorities: Vec<(Priority, f64)>,
    pub milestones_per_project: RangeInclusive<u32>,
    pub tasks_per_milestone: RangeInclusive<u32>,
    pub task_statuses: Vec<(TaskStatus, f64)>,
    pub task_priorities: Vec<(Priority, f64)>,
    pub task_types: Vec<(TaskType, f64)>,
    /// `{}` is replaced by a random word.
    pub task_title_templates: Vec<String>,
    pub max_frontend_dependencies: usize,
    pub blocker_reasons: Vec<String>,
    pub comments_per_task: RangeInclusive<u32>,
    pub tag_rules: Vec<TagRule>,
    pub work_logs_per_task: RangeInclusive<u32>,
    pub resource_request_count: u32,
    pub notifications_per_user: RangeInclusive<u32>,
    pub notification_types: Vec<(NotificationType, f64)>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::with_reference_date(DEFAULT_SEED, Local::now().date_naive())
    }
}

impl GeneratorConfig {
    /// The stock TechVision dataset with an explicit seed and clock.
    pub fn with_reference_date(seed: u64, reference_date: NaiveDate) -> Self {
        Self {
            seed,
            reference_date,
            organization_name: "TechVision Corp".to_string(),
            email_domain: "techvision.com".to_string(),
            departments: default_departments(),
            user_total: 150,
            roles: vec![
                role(UserRole::Ceo, 1, 40),
                role(UserRole::Vp, 7, 45),
                role(UserRole::Manager, 20, 40),
                role(UserRole::Lead, 25, 40),
                role(UserRole::Senior, 40, 40),
                role(UserRole::Junior, 45, 40),
                role(UserRole::Intern, 12, 20),
            ],
            timezones: vec![
                (Timezone::Pst, 0.4),
                (Timezone::Est, 0.3),
                (Timezone::Cst, 0.15),
                (Timezone::Gmt, 0.1),
                (Timezone::Ist, 0.05),
            ],
            overload_patterns: vec![
                OverloadPattern {
                    user_indices: vec![30, 45, 67],
                    factor: 1.5,
                },
                OverloadPattern {
                    user_indices: vec![88, 92],
                    factor: 1.3,
                },
            ],
            project_count: 25,
            project_templates: default_project_templates(),
            project_statuses: vec![
                (ProjectStatus::Active, 0.6),
                (ProjectStatus::Planning, 0.15),
                (ProjectStatus::OnHold, 0.1),
                (ProjectStatus::Completed, 0.1),
                (ProjectStatus::Cancelled, 0.05),
            ],
            project_priorities: vec![
                (Priority::Critical, 0.15),
                (Priority::High, 0.35),
                (Priority::Medium, 0.35),
                (Priority::Low, 0.15),
            ],
            milestones_per_project: 3..=8,
            tasks_per_milestone: 5..=20,
            task_statuses: vec![
                (TaskStatus::Todo, 0.25),
                (TaskStatus::InProgress, 0.35),
                (TaskStatus::Blocked, 0.1),
                (TaskStatus::InReview, 0.15),
                (TaskStatus::Completed, 0.15),
            ],
            task_priorities: vec![
                (Priority::Critical, 0.1),
                (Priority::High, 0.3),
                (Priority::Medium, 0.4),
                (Priority::Low, 0.2),
            ],
            task_types: vec![
                (TaskType::Feature, 0.4),
                (TaskType::Bug, 0.2),
                (TaskType::Improvement, 0.2),
                (TaskType::Documentation, 0.1),
                (TaskType::Meeting, 0.05),
                (TaskType::Review, 0.05),
            ],
            task_title_templates: strings(&[
                "Implement frontend for {}",
                "Build API endpoint for {}",
                "Create design mockup for {}",
                "Security audit for {}",
                "Database migration for {}",
                "Performance optimization for {}",
                "Deploy {} to production",
                "Compliance check for {}",
            ]),
            max_frontend_dependencies: 10,
            blocker_reasons: strings(&[
                "Waiting on API endpoint to be completed",
                "Need clarification from design team",
                "Blocked by external vendor response",
                "Technical issue: database connection failing",
                "Resource not available until next week",
                "Waiting for compliance approval",
                "Dependencies not yet resolved",
            ]),
            comments_per_task: 0..=5,
            tag_rules: vec![
                tag_rule(
                    &["user data", "authentication", "security", "audit", "compliance"],
                    &["soc2", "security"],
                ),
                tag_rule(&["api", "endpoint", "service"], &["api"]),
                tag_rule(&["ui", "interface", "design", "frontend"], &["ui"]),
                tag_rule(&["database", "migration", "schema"], &["database"]),
                tag_rule(&["performance", "optimize", "speed"], &["performance"]),
            ],
            work_logs_per_task: 1..=20,
            resource_request_count: 30,
            notifications_per_user: 0..=15,
            notification_types: vec![
                (NotificationType::TaskAssigned, 0.3),
                (NotificationType::BlockerCreated, 0.2),
                (NotificationType::Mention, 0.2),
                (NotificationType::DeadlineApproaching, 0.2),
                (NotificationType::StatusRequest, 0.1),
            ],
        }
    }

    /// Loads a config from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Sum of all role counts.
    pub fn role_total(&self) -> u32 {
        self.roles.iter().map(|spec| spec.count).sum()
    }

    /// Checks the invariants the generator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_total == 0 {
            return Err(invalid("user_total must be positive"));
        }
        if self.role_total() != self.user_total {
            return Err(invalid(format!(
                "role counts sum to {} but user_total is {}",
                self.role_total(),
                self.user_total
            )));
        }
        if self.departments.is_empty() {
            return Err(invalid("at least one department is required"));
        }
        check_weights(
            "departments",
            self.departments.iter().map(|spec| spec.weight),
        )?;
        for department in &self.departments {
            if department.specializations.is_empty() {
                return Err(invalid(format!(
                    "department `{}` has no specializations",
                    department.name
                )));
            }
            if department.team_names.len() < department.team_count {
                return Err(invalid(format!(
                    "department `{}` names {} of its {} teams",
                    department.name,
                    department.team_names.len(),
                    department.team_count
                )));
            }
        }
        if !self
            .roles
            .iter()
            .any(|spec| spec.count > 0 && spec.role.can_assign_work())
        {
            return Err(invalid("at least one manager, lead or vp is required"));
        }
        for pattern in &self.overload_patterns {
            if pattern.factor <= 1.0 {
                return Err(invalid(format!(
                    "overload factor {} must exceed 1.0",
                    pattern.factor
                )));
            }
        }
        if self.project_count == 0 {
            return Err(invalid("project_count must be positive"));
        }
        if self.project_count < self.project_templates.len() {
            return Err(invalid(format!(
                "project_count {} is smaller than the {} templates",
                self.project_count,
                self.project_templates.len()
            )));
        }
        check_weights("timezones", self.timezones.iter().map(|(_, w)| *w))?;
        check_weights(
            "project_statuses",
            self.project_statuses.iter().map(|(_, w)| *w),
        )?;
        check_weights(
            "project_priorities",
            self.project_priorities.iter().map(|(_, w)| *w),
        )?;
        check_weights("task_statuses", self.task_statuses.iter().map(|(_, w)| *w))?;
        check_weights(
            "task_priorities",
            self.task_priorities.iter().map(|(_, w)| *w),
        )?;
        check_weights("task_types", self.task_types.iter().map(|(_, w)| *w))?;
        check_weights(
            "notification_types",
            self.notification_types.iter().map(|(_, w)| *w),
        )?;
        for (name, range) in [
            ("milestones_per_project", &self.milestones_per_project),
            ("tasks_per_milestone", &self.tasks_per_milestone),
            ("comments_per_task", &self.comments_per_task),
            ("work_logs_per_task", &self.work_logs_per_task),
            ("notifications_per_user", &self.notifications_per_user),
        ] {
            if range.is_empty() {
                return Err(invalid(format!("{name} range is inverted")));
            }
        }
        if *self.milestones_per_project.start() == 0 || *self.tasks_per_milestone.start() == 0 {
            return Err(invalid(
                "every project needs a milestone and every milestone a task",
            ));
        }
        if self.task_title_templates.is_empty() {
            return Err(invalid("task_title_templates cannot be empty"));
        }
        if self.blocker_reasons.is_empty() {
            return Err(invalid("blocker_reasons cannot be empty"));
        }
        Ok(())
    }
}

/// Process-level settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub db_path: PathBuf,
    pub manifest_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    /// `None` when the environment leaves the seed unset.
    pub seed: Option<u64>,
    /// `None` when the environment leaves the reference date unset.
    pub reference_date: Option<NaiveDate>,
    /// Local date at resolution time; the clock when nothing else sets one.
    pub today: NaiveDate,
    /// Optional JSON file replacing the stock generator config.
    pub config_path: Option<PathBuf>,
}

impl DemoSettings {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
        Self::from_lookup(&cwd, Local::now().date_naive(), |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolves settings through `lookup`, anchoring relative log paths at
    /// `cwd` and defaulting the clock to `today`.
    pub fn from_lookup<F>(cwd: &Path, today: NaiveDate, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let seed = non_empty(ENV_SEED)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        key: ENV_SEED,
                        value: raw,
                    })
            })
            .transpose()?;
        let reference_date = non_empty(ENV_REFERENCE_DATE)
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                    ConfigError::InvalidEnv {
                        key: ENV_REFERENCE_DATE,
                        value: raw,
                    }
                })
            })
            .transpose()?;
        let log_dir = non_empty(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_SUBDIR));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };

        Ok(Self {
            db_path: non_empty(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            manifest_path: non_empty(ENV_MANIFEST_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH)),
            log_dir,
            log_level: non_empty(ENV_LOG_LEVEL)
                .unwrap_or_else(|| crate::logging::default_log_level().to_string()),
            seed,
            reference_date,
            today,
            config_path: non_empty(ENV_CONFIG_PATH).map(PathBuf::from),
        })
    }

    /// Builds the generator config: the JSON file when configured, else the
    /// stock dataset with the default seed and today's date. A seed or clock
    /// set in the environment overrides either source.
    pub fn generator_config(&self) -> Result<GeneratorConfig, ConfigError> {
        let mut config = match &self.config_path {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::with_reference_date(DEFAULT_SEED, self.today),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(reference_date) = self.reference_date {
            config.reference_date = reference_date;
        }
        config.validate()?;
        Ok(config)
    }

    /// Date the analyzer treats as "today".
    pub fn analysis_date(&self) -> NaiveDate {
        self.reference_date.unwrap_or(self.today)
    }
}

fn default_departments() -> Vec<DepartmentSpec> {
    use Specialization as S;
    vec![
        department(
            "Engineering",
            DepartmentType::Engineering,
            0.4,
            &[S::Frontend, S::Backend, S::Fullstack, S::Devops, S::Data],
            8,
            &[
                "Frontend", "Backend", "Mobile", "DevOps", "Data", "API", "Security", "Platform",
            ],
        ),
        department(
            "Design",
            DepartmentType::Design,
            0.15,
            &[S::UiUx, S::Product],
            3,
            &["Product Design", "Brand", "Research"],
        ),
        department(
            "Product",
            DepartmentType::Product,
            0.15,
            &[S::Product, S::Business],
            3,
            &["B2B", "B2C", "Platform"],
        ),
        department(
            "Sales",
            DepartmentType::Sales,
            0.1,
            &[S::Business],
            2,
            &["Enterprise", "SMB"],
        ),
        department(
            "Operations",
            DepartmentType::Operations,
            0.1,
            &[S::Business, S::Data],
            2,
            &["Infrastructure", "Process"],
        ),
        department(
            "Finance",
            DepartmentType::Finance,
            0.05,
            &[S::Business],
            1,
            &["Finance"],
        ),
        department(
            "Compliance",
            DepartmentType::Compliance,
            0.05,
            &[S::Business],
            1,
            &["Compliance"],
        ),
    ]
}

fn default_project_templates() -> Vec<ProjectTemplate> {
    vec![
        ProjectTemplate {
            name: "Mobile App 2.0".to_string(),
            code_name: "Phoenix".to_string(),
            priority: Priority::Critical,
            status: ProjectStatus::Active,
            risk_score: 8,
            client_facing: true,
            compliance_required: false,
            budget: Some(500_000),
            budget_consumed_ratio: Some(0.7),
        },
        ProjectTemplate {
            name: "Enterprise API Platform".to_string(),
            code_name: "Atlas".to_string(),
            priority: Priority::High,
            status: ProjectStatus::Active,
            risk_score: 6,
            client_facing: true,
            compliance_required: false,
            budget: Some(800_000),
            budget_consumed_ratio: Some(0.4),
        },
        ProjectTemplate {
            name: "SOC2 Compliance Initiative".to_string(),
            code_name: "Shield".to_string(),
            priority: Priority::Critical,
            status: ProjectStatus::Active,
            risk_score: 9,
            client_facing: false,
            compliance_required: true,
            budget: Some(200_000),
            budget_consumed_ratio: Some(0.6),
        },
        ProjectTemplate {
            name: "Customer Portal".to_string(),
            code_name: "Gateway".to_string(),
            priority: Priority::High,
            status: ProjectStatus::Active,
            risk_score: 5,
            client_facing: true,
            compliance_required: false,
            budget: None,
            budget_consumed_ratio: None,
        },
    ]
}

fn department(
    name: &str,
    kind: DepartmentType,
    weight: f64,
    specializations: &[Specialization],
    team_count: usize,
    team_names: &[&str],
) -> DepartmentSpec {
    DepartmentSpec {
        name: name.to_string(),
        kind,
        weight,
        specializations: specializations.to_vec(),
        team_count,
        team_names: strings(team_names),
    }
}

fn role(role: UserRole, count: u32, availability_hours: u32) -> RoleSpec {
    RoleSpec {
        role,
        count,
        availability_hours,
    }
}

fn tag_rule(keywords: &[&str], tags: &[&str]) -> TagRule {
    TagRule {
        keywords: strings(keywords),
        tags: strings(tags),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn check_weights(name: &str, weights: impl Iterator<Item = f64>) -> Result<(), ConfigError> {
    let mut total = 0.0;
    let mut seen = 0usize;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(invalid(format!("{name} contains weight {weight}")));
        }
        total += weight;
        seen += 1;
    }
    if seen == 0 || total <= 0.0 {
        return Err(invalid(format!("{name} needs at least one positive weight")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, DemoSettings, GeneratorConfig, DEFAULT_DB_PATH, DEFAULT_SEED, ENV_CONFIG_PATH,
        ENV_LOG_DIR, ENV_REFERENCE_DATE, ENV_SEED,
    };
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stock_config_is_valid_and_role_counts_match_total() {
        let config = GeneratorConfig::with_reference_date(7, date(2026, 3, 2));
        config.validate().unwrap();
        assert_eq!(config.role_total(), 150);
        assert_eq!(config.departments.len(), 7);
        assert_eq!(config.project_templates.len(), 4);
    }

    #[test]
    fn validate_rejects_mismatched_role_total() {
        let mut config = GeneratorConfig::with_reference_date(7, date(2026, 3, 2));
        config.user_total = 151;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("role counts"));
    }

    #[test]
    fn validate_rejects_weak_overload_factor_and_zero_weights() {
        let mut config = GeneratorConfig::with_reference_date(7, date(2026, 3, 2));
        config.overload_patterns[0].factor = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GeneratorConfig::with_reference_date(7, date(2026, 3, 2));
        for entry in &mut config.task_statuses {
            entry.1 = 0.0;
        }
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let settings =
            DemoSettings::from_lookup(Path::new("/work"), date(2026, 1, 5), |_| None).unwrap();
        assert_eq!(settings.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(settings.seed, None);
        assert_eq!(settings.reference_date, None);
        assert_eq!(settings.analysis_date(), date(2026, 1, 5));

        let config = settings.generator_config().unwrap();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.reference_date, date(2026, 1, 5));
        assert_eq!(settings.log_dir, PathBuf::from("/work/generated/logs"));
        assert!(settings.config_path.is_none());
    }

    #[test]
    fn settings_read_overrides_and_reject_bad_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_SEED, "7"),
            (ENV_REFERENCE_DATE, "2025-12-31"),
            (ENV_LOG_DIR, "/var/log/demo"),
        ]);
        let settings = DemoSettings::from_lookup(Path::new("/work"), date(2026, 1, 5), |key| {
            env.get(key).map(|value| value.to_string())
        })
        .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.reference_date, Some(date(2025, 12, 31)));
        assert_eq!(settings.analysis_date(), date(2025, 12, 31));
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/demo"));

        let err = DemoSettings::from_lookup(Path::new("/work"), date(2026, 1, 5), |key| {
            (key == ENV_SEED).then(|| "forty-two".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: ENV_SEED, .. }));
    }

    #[test]
    fn config_round_trips_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = GeneratorConfig::with_reference_date(3, date(2026, 2, 1));
        config.project_count = 6;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = GeneratorConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn json_file_seed_and_date_survive_unset_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = GeneratorConfig::with_reference_date(7, date(2025, 1, 1));
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let config_path = path.to_string_lossy().into_owned();

        let settings = DemoSettings::from_lookup(Path::new("/work"), date(2026, 3, 2), |key| {
            (key == ENV_CONFIG_PATH).then(|| config_path.clone())
        })
        .unwrap();
        let loaded = settings.generator_config().unwrap();
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.reference_date, date(2025, 1, 1));

        let env: HashMap<&str, String> = HashMap::from([
            (ENV_CONFIG_PATH, config_path.clone()),
            (ENV_SEED, "11".to_string()),
            (ENV_REFERENCE_DATE, "2026-02-14".to_string()),
        ]);
        let settings = DemoSettings::from_lookup(Path::new("/work"), date(2026, 3, 2), |key| {
            env.get(key).cloned()
        })
        .unwrap();
        let loaded = settings.generator_config().unwrap();
        assert_eq!(loaded.seed, 11);
        assert_eq!(loaded.reference_date, date(2026, 2, 14));
    }
}
