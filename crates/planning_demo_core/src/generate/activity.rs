//! Rows hanging off tasks and users: dependencies, comments, tags, work
//! logs, resource requests and notifications.

use super::fake::Faker;
use super::rng::DemoRng;
use super::{at_hour, days_before, round2, row_id, GenerateError, GenerateResult};
use crate::config::{GeneratorConfig, TagRule};
use crate::model::activity::{
    EntityType, Notification, RequestStatus, RequestType, ResourceRequest, Urgency,
};
use crate::model::org::{User, UserRole};
use crate::model::project::{Milestone, Project};
use crate::model::task::{
    DependencyType, Task, TaskComment, TaskDependency, TaskStatus, TaskTag, WorkLog,
};
use crate::model::RowId;
use crate::repo::planning_repo::PlanningWriter;
use chrono::{Datelike, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static BACKEND_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)api|backend").expect("valid backend title regex"));
static FRONTEND_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)frontend|ui").expect("valid frontend title regex"));

const WEEKEND_LOG_CHANCE: f64 = 0.15;
const WORK_LOG_HOUR: u32 = 18;

/// The "API blocks frontend" chain.
///
/// Up to `max_frontend_dependencies` frontend/UI tasks each wait on a random
/// API/backend task. Titles can match both sets, so self edges and repeated
/// pairs are skipped.
pub fn generate_task_dependencies<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    tasks: &[Task],
) -> GenerateResult<Vec<TaskDependency>> {
    let backend: Vec<&Task> = tasks
        .iter()
        .filter(|task| BACKEND_TITLE_RE.is_match(&task.title))
        .collect();
    let frontend: Vec<&Task> = tasks
        .iter()
        .filter(|task| FRONTEND_TITLE_RE.is_match(&task.title))
        .collect();

    let mut dependencies = Vec::new();
    if backend.is_empty() {
        return Ok(dependencies);
    }

    let mut seen = HashSet::new();
    for waiting in rng.sample(&frontend, config.max_frontend_dependencies) {
        let blocker = rng.pick(&backend, "backend tasks")?;
        if blocker.id == waiting.id || !seen.insert((waiting.id, blocker.id)) {
            debug!(
                "event=generate_step module=generate status=skip table=task_dependencies task_id={} depends_on={}",
                waiting.id, blocker.id
            );
            continue;
        }

        let dependency = TaskDependency {
            id: row_id(dependencies.len()),
            task_id: waiting.id,
            depends_on_task_id: blocker.id,
            dependency_type: DependencyType::Blocks,
            is_hard_dependency: true,
        };
        writer.insert_task_dependency(&dependency)?;
        dependencies.push(dependency);
    }
    Ok(dependencies)
}

/// One blocker-reason comment per blocked task plus regular discussion.
pub fn generate_task_comments<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    tasks: &[Task],
    users: &[User],
) -> GenerateResult<usize> {
    let mut next = 0usize;
    for task in tasks {
        if task.status == TaskStatus::Blocked {
            let commenter = rng.pick(users, "users")?;
            let reason = rng.pick(&config.blocker_reasons, "blocker reasons")?;
            let comment = TaskComment {
                id: row_id(next),
                task_id: task.id,
                user_id: commenter.id,
                comment_text: reason.clone(),
                is_blocker_reason: true,
                created_at: comment_time(config, rng),
            };
            writer.insert_task_comment(&comment)?;
            next += 1;
        }

        for _ in 0..rng.int(config.comments_per_task.clone()) {
            let commenter = rng.pick(users, "users")?;
            let comment_text = Faker::new(rng).paragraph()?;
            let comment = TaskComment {
                id: row_id(next),
                task_id: task.id,
                user_id: commenter.id,
                comment_text,
                is_blocker_reason: false,
                created_at: comment_time(config, rng),
            };
            writer.insert_task_comment(&comment)?;
            next += 1;
        }
    }
    Ok(next)
}

fn comment_time(config: &GeneratorConfig, rng: &mut DemoRng) -> chrono::NaiveDateTime {
    let day = days_before(config.reference_date, rng.days(0..=14));
    at_hour(day, rng.int(9..=17))
}

/// Keyword rules compiled to case-insensitive substring matchers.
pub struct TagMatcher {
    rules: Vec<(Regex, Vec<String>)>,
}

impl TagMatcher {
    pub fn new(rules: &[TagRule]) -> GenerateResult<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules.iter().filter(|rule| !rule.keywords.is_empty()) {
            let alternatives: Vec<String> =
                rule.keywords.iter().map(|keyword| regex::escape(keyword)).collect();
            let pattern = format!("(?i){}", alternatives.join("|"));
            let regex = Regex::new(&pattern)
                .map_err(|err| GenerateError::InvalidTagRule(err.to_string()))?;
            compiled.push((regex, rule.tags.clone()));
        }
        Ok(Self { rules: compiled })
    }

    /// Distinct tags for a task, in rule order.
    pub fn tags_for(&self, title: &str, description: Option<&str>) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for (regex, rule_tags) in &self.rules {
            let hit = regex.is_match(title) || description.map_or(false, |text| regex.is_match(text));
            if !hit {
                continue;
            }
            for tag in rule_tags {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }
}

pub fn generate_task_tags<W: PlanningWriter>(
    config: &GeneratorConfig,
    writer: &W,
    tasks: &[Task],
) -> GenerateResult<usize> {
    let matcher = TagMatcher::new(&config.tag_rules)?;
    let mut inserted = 0usize;
    for task in tasks {
        for tag in matcher.tags_for(&task.title, task.description.as_deref()) {
            writer.insert_task_tag(&TaskTag {
                task_id: task.id,
                tag,
            })?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

/// Historical work logs by each active task's assignee.
///
/// Weekend dates survive only with a small probability; juniors and interns
/// log more hours, seniors and leads slightly fewer.
pub fn generate_work_logs<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    tasks: &[Task],
    users: &[User],
) -> GenerateResult<usize> {
    let roles: HashMap<RowId, UserRole> = users.iter().map(|user| (user.id, user.role)).collect();
    let mut next = 0usize;

    for task in tasks.iter().filter(|task| task.status.has_logged_work()) {
        let multiplier = match roles.get(&task.assigned_to) {
            Some(UserRole::Junior | UserRole::Intern) => 1.3,
            Some(UserRole::Senior | UserRole::Lead) => 0.95,
            _ => 1.0,
        };

        for _ in 0..rng.int(config.work_logs_per_task.clone()) {
            let log_date = days_before(config.reference_date, rng.days(1..=90));
            let weekend = matches!(log_date.weekday(), Weekday::Sat | Weekday::Sun);
            if weekend && !rng.chance(WEEKEND_LOG_CHANCE) {
                continue;
            }

            let hours_logged = round2(rng.uniform(0.5, 10.0) * multiplier);
            let description = Faker::new(rng).sentence()?;
            let log = WorkLog {
                id: row_id(next),
                task_id: task.id,
                user_id: task.assigned_to,
                hours_logged,
                log_date,
                description: Some(description),
                created_at: at_hour(log_date, WORK_LOG_HOUR),
            };
            writer.insert_work_log(&log)?;
            next += 1;
        }
    }
    Ok(next)
}

pub fn generate_resource_requests<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    users: &[User],
    projects: &[Project],
) -> GenerateResult<usize> {
    let requesters: Vec<&User> = users
        .iter()
        .filter(|user| user.role.can_assign_work())
        .collect();

    for index in 0..config.resource_request_count as usize {
        let requester = rng.pick(&requesters, "resource requesters")?;
        let project = rng.pick(projects, "projects")?;
        let request = ResourceRequest {
            id: row_id(index),
            requested_by: requester.id,
            project_id: project.id,
            request_type: *rng.pick(RequestType::ALL, "request types")?,
            urgency: *rng.pick(Urgency::ALL, "urgencies")?,
            status: *rng.pick(RequestStatus::ALL, "request statuses")?,
            created_at: at_hour(days_before(config.reference_date, rng.days(0..=30)), 10),
        };
        writer.insert_resource_request(&request)?;
    }
    Ok(config.resource_request_count as usize)
}

/// Per-user notifications pointing at a random task, project or milestone.
pub fn generate_notifications<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    users: &[User],
    tasks: &[Task],
    projects: &[Project],
    milestones: &[Milestone],
) -> GenerateResult<usize> {
    let mut next = 0usize;
    for user in users {
        for _ in 0..rng.int(config.notifications_per_user.clone()) {
            let kind = rng.weighted(&config.notification_types, "notification types")?;
            let wanted = *rng.pick(EntityType::ALL, "entity types")?;
            let Some((entity_type, entity_id, message)) =
                pick_entity(rng, wanted, tasks, projects, milestones)?
            else {
                continue;
            };

            let notification = Notification {
                id: row_id(next),
                user_id: user.id,
                kind,
                entity_type,
                entity_id,
                message,
                is_read: rng.chance(0.6),
                action_required: rng.chance(0.25),
                created_at: at_hour(days_before(config.reference_date, rng.days(0..=7)), 9),
            };
            writer.insert_notification(&notification)?;
            next += 1;
        }
    }
    Ok(next)
}

/// Resolves the wanted entity, falling back to milestones when its pool is
/// empty. `None` when there is nothing to point at.
fn pick_entity(
    rng: &mut DemoRng,
    wanted: EntityType,
    tasks: &[Task],
    projects: &[Project],
    milestones: &[Milestone],
) -> GenerateResult<Option<(EntityType, RowId, String)>> {
    let picked = match wanted {
        EntityType::Task if !tasks.is_empty() => {
            let task = rng.pick(tasks, "tasks")?;
            Some((
                EntityType::Task,
                task.id,
                format!("You have been assigned to: {}", task.title),
            ))
        }
        EntityType::Project if !projects.is_empty() => {
            let project = rng.pick(projects, "projects")?;
            Some((
                EntityType::Project,
                project.id,
                format!("Project update: {}", project.name),
            ))
        }
        _ if !milestones.is_empty() => {
            let milestone = rng.pick(milestones, "milestones")?;
            Some((
                EntityType::Milestone,
                milestone.id,
                format!("Milestone approaching: {}", milestone.name),
            ))
        }
        _ => None,
    };
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::{TagMatcher, BACKEND_TITLE_RE, FRONTEND_TITLE_RE};
    use crate::config::GeneratorConfig;
    use chrono::NaiveDate;

    fn matcher() -> TagMatcher {
        let config =
            GeneratorConfig::with_reference_date(1, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        TagMatcher::new(&config.tag_rules).unwrap()
    }

    #[test]
    fn build_titles_match_both_dependency_sets() {
        let title = "Build API endpoint for search";
        assert!(BACKEND_TITLE_RE.is_match(title));
        assert!(FRONTEND_TITLE_RE.is_match(title));
        assert!(!BACKEND_TITLE_RE.is_match("Create design mockup for inbox"));
    }

    #[test]
    fn tags_follow_rule_order_without_duplicates() {
        let tags = matcher().tags_for(
            "Security audit for ledger",
            Some("Schema review. Compliance sign-off needed."),
        );
        assert_eq!(tags, vec!["soc2", "security", "database"]);
    }

    #[test]
    fn description_keywords_count_and_absent_text_is_fine() {
        let matcher = matcher();
        assert_eq!(
            matcher.tags_for("Deploy ledger to production", Some("Speed matters.")),
            vec!["performance"]
        );
        assert!(matcher.tags_for("Deploy ledger to production", None).is_empty());
    }

    #[test]
    fn empty_keyword_rules_are_ignored() {
        let rules = vec![crate::config::TagRule {
            keywords: Vec::new(),
            tags: vec!["everything".to_string()],
        }];
        let matcher = TagMatcher::new(&rules).unwrap();
        assert!(matcher.tags_for("anything", None).is_empty());
    }
}
