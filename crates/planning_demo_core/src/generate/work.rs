//! Projects, milestones and tasks.

use super::fake::{capitalize, Faker};
use super::rng::DemoRng;
use super::{
    at_hour, days_after, days_before, generated_at, round2, row_id, GenerateError, GenerateResult,
};
use crate::config::{GeneratorConfig, ProjectTemplate};
use crate::model::org::{Organization, User};
use crate::model::project::{Milestone, MilestoneStatus, Project, ProjectStatus};
use crate::model::task::{Task, TaskStatus};
use crate::repo::planning_repo::PlanningWriter;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static COMPLIANCE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)compliance|security|audit").expect("valid compliance title regex")
});
static API_TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)api").expect("valid api regex"));

const TASK_CREATED_HOUR: u32 = 9;
const TASK_COMPLETED_HOUR: u32 = 17;

/// Template projects first, then random ones up to the configured count.
pub fn generate_projects<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    organization: &Organization,
) -> GenerateResult<Vec<Project>> {
    let mut projects = Vec::with_capacity(config.project_count);

    for template in &config.project_templates {
        let project = templated_project(config, rng, organization, template, projects.len());
        writer.insert_project(&project)?;
        projects.push(project);
    }

    while projects.len() < config.project_count {
        let project = random_project(config, rng, organization, projects.len())?;
        writer.insert_project(&project)?;
        projects.push(project);
    }
    Ok(projects)
}

fn templated_project(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    organization: &Organization,
    template: &ProjectTemplate,
    index: usize,
) -> Project {
    let (start_date, target_end_date) = project_window(config, rng);
    let budget = match template.budget {
        Some(budget) => f64::from(budget),
        None => f64::from(rng.int(50_000..=1_000_000)),
    };
    let ratio = match template.budget_consumed_ratio {
        Some(ratio) => ratio,
        None => rng.uniform(0.1, 0.8),
    };

    Project {
        id: row_id(index),
        organization_id: organization.id,
        name: template.name.clone(),
        code_name: template.code_name.clone(),
        status: template.status,
        priority: template.priority,
        start_date,
        target_end_date,
        actual_end_date: completed_end(template.status, target_end_date),
        budget_allocated: round2(budget),
        budget_consumed: round2(budget * ratio),
        risk_score: template.risk_score,
        compliance_required: template.compliance_required,
        client_facing: template.client_facing,
        created_at: at_hour(start_date, TASK_CREATED_HOUR),
    }
}

fn random_project(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    organization: &Organization,
    index: usize,
) -> GenerateResult<Project> {
    let status = rng.weighted(&config.project_statuses, "project statuses")?;
    let priority = rng.weighted(&config.project_priorities, "project priorities")?;
    let (start_date, target_end_date) = project_window(config, rng);
    let budget = f64::from(rng.int(50_000..=1_000_000));
    let ratio = rng.uniform(0.1, 0.8);

    let mut fake = Faker::new(rng);
    let name = fake.catch_phrase()?;
    let code_name = capitalize(fake.word()?);

    Ok(Project {
        id: row_id(index),
        organization_id: organization.id,
        name,
        code_name,
        status,
        priority,
        start_date,
        target_end_date,
        actual_end_date: completed_end(status, target_end_date),
        budget_allocated: round2(budget),
        budget_consumed: round2(budget * ratio),
        risk_score: rng.int(1..=10) as u8,
        compliance_required: rng.coin(),
        client_facing: rng.coin(),
        created_at: at_hour(start_date, TASK_CREATED_HOUR),
    })
}

/// Start 30..=180 days before the reference date, lasting 60..=365 days.
fn project_window(config: &GeneratorConfig, rng: &mut DemoRng) -> (NaiveDate, NaiveDate) {
    let start = days_before(config.reference_date, rng.days(30..=180));
    let end = days_after(start, rng.days(60..=365));
    (start, end)
}

fn completed_end(status: ProjectStatus, target_end_date: NaiveDate) -> Option<NaiveDate> {
    (status == ProjectStatus::Completed).then_some(target_end_date)
}

/// Milestones spaced evenly across each project's window.
pub fn generate_milestones<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    projects: &[Project],
) -> GenerateResult<Vec<Milestone>> {
    let mut milestones = Vec::new();
    for project in projects {
        let count = i64::from(rng.int(config.milestones_per_project.clone()));
        let duration = (project.target_end_date - project.start_date).num_days();

        for position in 0..count {
            let offset = duration * (position + 1) / (count + 1);
            let status = match project.status {
                ProjectStatus::Completed => MilestoneStatus::Completed,
                ProjectStatus::Planning => MilestoneStatus::NotStarted,
                _ => *rng.pick(MilestoneStatus::ALL, "milestone statuses")?,
            };
            let health_status = *rng.pick(status.health_candidates(), "health statuses")?;
            let completion_percentage = if status == MilestoneStatus::NotStarted {
                0
            } else {
                rng.int(0..=100)
            };
            let is_critical_path = rng.chance(0.3);
            let phrase = Faker::new(rng).bs()?;

            let milestone = Milestone {
                id: row_id(milestones.len()),
                project_id: project.id,
                name: format!("Milestone {}: {phrase}", position + 1),
                due_date: days_after(project.start_date, offset),
                status,
                completion_percentage,
                is_critical_path,
                health_status,
            };
            writer.insert_milestone(&milestone)?;
            milestones.push(milestone);
        }
    }
    Ok(milestones)
}

/// Tasks per milestone, due within the week before the milestone.
pub fn generate_tasks<W: PlanningWriter>(
    config: &GeneratorConfig,
    rng: &mut DemoRng,
    writer: &W,
    milestones: &[Milestone],
    users: &[User],
) -> GenerateResult<Vec<Task>> {
    let assigners: Vec<&User> = users
        .iter()
        .filter(|user| user.role.can_assign_work())
        .collect();
    if assigners.is_empty() {
        return Err(GenerateError::EmptyPool("task assigners"));
    }

    let mut tasks = Vec::new();
    for milestone in milestones {
        let count = rng.int(config.tasks_per_milestone.clone());
        for _ in 0..count {
            let status = rng.weighted(&config.task_statuses, "task statuses")?;
            let priority = rng.weighted(&config.task_priorities, "task priorities")?;
            let task_type = rng.weighted(&config.task_types, "task types")?;
            let assignee = rng.pick(users, "users")?;
            let assigner = rng.pick(&assigners, "task assigners")?;

            let start_date = days_before(milestone.due_date, rng.days(7..=30));
            let due_date = days_before(milestone.due_date, rng.days(0..=7));
            let estimated_hours = round2(rng.uniform(2.0, 40.0));
            let actual_hours = if status.has_actual_hours() {
                Some(round2(estimated_hours * rng.uniform(0.5, 1.5)))
            } else {
                None
            };

            let template = rng.pick(&config.task_title_templates, "task title templates")?;
            let mut fake = Faker::new(rng);
            let title = template.replacen("{}", fake.word()?, 1);
            let description = fake.paragraph()?;

            let completed_at = (status == TaskStatus::Completed)
                .then(|| at_hour(config.reference_date, TASK_COMPLETED_HOUR));
            let requires_compliance_check = COMPLIANCE_TITLE_RE.is_match(&title);
            let is_blocking = status == TaskStatus::Blocked
                || (API_TITLE_RE.is_match(&title) && rng.chance(0.3));
            let created_at = at_hour(start_date, TASK_CREATED_HOUR).min(generated_at(config));

            let task = Task {
                id: row_id(tasks.len()),
                milestone_id: milestone.id,
                parent_task_id: None,
                title,
                description: Some(description),
                status,
                priority,
                assigned_to: assignee.id,
                assigned_by: assigner.id,
                estimated_hours,
                actual_hours,
                start_date,
                due_date,
                completed_at,
                task_type,
                requires_compliance_check,
                is_blocking,
                created_at,
                updated_at: completed_at.unwrap_or(created_at),
            };
            writer.insert_task(&task)?;
            tasks.push(task);
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::{API_TITLE_RE, COMPLIANCE_TITLE_RE};

    #[test]
    fn title_matchers_use_substring_semantics() {
        assert!(COMPLIANCE_TITLE_RE.is_match("Security audit for ledger"));
        assert!(COMPLIANCE_TITLE_RE.is_match("Compliance check for token"));
        assert!(!COMPLIANCE_TITLE_RE.is_match("Deploy search to production"));
        assert!(API_TITLE_RE.is_match("Build API endpoint for search"));
        assert!(API_TITLE_RE.is_match("Deploy rapid to production"));
        assert!(!API_TITLE_RE.is_match("Implement frontend for inbox"));
    }
}
