//! Write-side repository used by the generator.
//!
//! # Responsibility
//! - Persist one generated record per call, with caller-assigned ids.
//!
//! # Invariants
//! - Booleans are stored as 0/1, dates as `YYYY-MM-DD`, timestamps as
//!   `YYYY-MM-DD HH:MM:SS`.
//! - Statements are cached per connection; callers batch many inserts in
//!   one transaction.

use super::RepoResult;
use crate::model::activity::{Notification, ResourceRequest};
use crate::model::org::{Department, Organization, Team, TeamMember, User};
use crate::model::project::{Milestone, Project};
use crate::model::task::{Task, TaskComment, TaskDependency, TaskTag, WorkLog};
use rusqlite::{params, Connection};

/// Insert contract for every planning table.
pub trait PlanningWriter {
    fn insert_organization(&self, row: &Organization) -> RepoResult<()>;
    fn insert_department(&self, row: &Department) -> RepoResult<()>;
    fn insert_user(&self, row: &User) -> RepoResult<()>;
    fn insert_team(&self, row: &Team) -> RepoResult<()>;
    fn insert_team_member(&self, row: &TeamMember) -> RepoResult<()>;
    fn insert_project(&self, row: &Project) -> RepoResult<()>;
    fn insert_milestone(&self, row: &Milestone) -> RepoResult<()>;
    fn insert_task(&self, row: &Task) -> RepoResult<()>;
    fn insert_task_dependency(&self, row: &TaskDependency) -> RepoResult<()>;
    fn insert_task_comment(&self, row: &TaskComment) -> RepoResult<()>;
    fn insert_task_tag(&self, row: &TaskTag) -> RepoResult<()>;
    fn insert_work_log(&self, row: &WorkLog) -> RepoResult<()>;
    fn insert_resource_request(&self, row: &ResourceRequest) -> RepoResult<()>;
    fn insert_notification(&self, row: &Notification) -> RepoResult<()>;
}

/// SQLite-backed writer over a migrated connection (or open transaction).
pub struct SqlitePlanningWriter<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlanningWriter<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn execute<P: rusqlite::Params>(&self, sql: &str, params: P) -> RepoResult<()> {
        self.conn.prepare_cached(sql)?.execute(params)?;
        Ok(())
    }
}

impl PlanningWriter for SqlitePlanningWriter<'_> {
    fn insert_organization(&self, row: &Organization) -> RepoResult<()> {
        self.execute(
            "INSERT INTO organizations (id, name, created_at) VALUES (?1, ?2, ?3);",
            params![row.id, row.name, row.created_at],
        )
    }

    fn insert_department(&self, row: &Department) -> RepoResult<()> {
        self.execute(
            "INSERT INTO departments (id, organization_id, name, type)
             VALUES (?1, ?2, ?3, ?4);",
            params![row.id, row.organization_id, row.name, row.kind],
        )
    }

    fn insert_user(&self, row: &User) -> RepoResult<()> {
        self.execute(
            "INSERT INTO users (
                id, organization_id, department_id, email, full_name, role,
                specialization, availability_hours_per_week, timezone, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                row.id,
                row.organization_id,
                row.department_id,
                row.email,
                row.full_name,
                row.role,
                row.specialization,
                row.availability_hours_per_week,
                row.timezone,
                row.created_at,
            ],
        )
    }

    fn insert_team(&self, row: &Team) -> RepoResult<()> {
        self.execute(
            "INSERT INTO teams (id, department_id, name, lead_user_id) VALUES (?1, ?2, ?3, ?4);",
            params![row.id, row.department_id, row.name, row.lead_user_id],
        )
    }

    fn insert_team_member(&self, row: &TeamMember) -> RepoResult<()> {
        self.execute(
            "INSERT INTO team_members (team_id, user_id, allocation_percentage)
             VALUES (?1, ?2, ?3);",
            params![row.team_id, row.user_id, row.allocation_percentage],
        )
    }

    fn insert_project(&self, row: &Project) -> RepoResult<()> {
        self.execute(
            "INSERT INTO projects (
                id, organization_id, name, code_name, status, priority,
                start_date, target_end_date, actual_end_date,
                budget_allocated, budget_consumed, risk_score,
                compliance_required, client_facing, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                row.id,
                row.organization_id,
                row.name,
                row.code_name,
                row.status,
                row.priority,
                row.start_date,
                row.target_end_date,
                row.actual_end_date,
                row.budget_allocated,
                row.budget_consumed,
                row.risk_score,
                bool_to_int(row.compliance_required),
                bool_to_int(row.client_facing),
                row.created_at,
            ],
        )
    }

    fn insert_milestone(&self, row: &Milestone) -> RepoResult<()> {
        self.execute(
            "INSERT INTO milestones (
                id, project_id, name, due_date, status,
                completion_percentage, is_critical_path, health_status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                row.id,
                row.project_id,
                row.name,
                row.due_date,
                row.status,
                row.completion_percentage,
                bool_to_int(row.is_critical_path),
                row.health_status,
            ],
        )
    }

    fn insert_task(&self, row: &Task) -> RepoResult<()> {
        self.execute(
            "INSERT INTO tasks (
                id, milestone_id, parent_task_id, title, description,
                status, priority, assigned_to, assigned_by,
                estimated_hours, actual_hours, start_date, due_date,
                completed_at, task_type, requires_compliance_check, is_blocking,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19
            );",
            params![
                row.id,
                row.milestone_id,
                row.parent_task_id,
                row.title,
                row.description,
                row.status,
                row.priority,
                row.assigned_to,
                row.assigned_by,
                row.estimated_hours,
                row.actual_hours,
                row.start_date,
                row.due_date,
                row.completed_at,
                row.task_type,
                bool_to_int(row.requires_compliance_check),
                bool_to_int(row.is_blocking),
                row.created_at,
                row.updated_at,
            ],
        )
    }

    fn insert_task_dependency(&self, row: &TaskDependency) -> RepoResult<()> {
        self.execute(
            "INSERT INTO task_dependencies (
                id, task_id, depends_on_task_id, dependency_type, is_hard_dependency
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                row.id,
                row.task_id,
                row.depends_on_task_id,
                row.dependency_type,
                bool_to_int(row.is_hard_dependency),
            ],
        )
    }

    fn insert_task_comment(&self, row: &TaskComment) -> RepoResult<()> {
        self.execute(
            "INSERT INTO task_comments (
                id, task_id, user_id, comment_text, is_blocker_reason, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                row.id,
                row.task_id,
                row.user_id,
                row.comment_text,
                bool_to_int(row.is_blocker_reason),
                row.created_at,
            ],
        )
    }

    fn insert_task_tag(&self, row: &TaskTag) -> RepoResult<()> {
        self.execute(
            "INSERT INTO task_tags (task_id, tag) VALUES (?1, ?2);",
            params![row.task_id, row.tag],
        )
    }

    fn insert_work_log(&self, row: &WorkLog) -> RepoResult<()> {
        self.execute(
            "INSERT INTO work_logs (
                id, task_id, user_id, hours_logged, log_date, description, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                row.id,
                row.task_id,
                row.user_id,
                row.hours_logged,
                row.log_date,
                row.description,
                row.created_at,
            ],
        )
    }

    fn insert_resource_request(&self, row: &ResourceRequest) -> RepoResult<()> {
        self.execute(
            "INSERT INTO resource_requests (
                id, requested_by, project_id, request_type, urgency, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                row.id,
                row.requested_by,
                row.project_id,
                row.request_type,
                row.urgency,
                row.status,
                row.created_at,
            ],
        )
    }

    fn insert_notification(&self, row: &Notification) -> RepoResult<()> {
        self.execute(
            "INSERT INTO notifications (
                id, user_id, type, entity_type, entity_id,
                message, is_read, action_required, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                row.id,
                row.user_id,
                row.kind,
                row.entity_type,
                row.entity_id,
                row.message,
                bool_to_int(row.is_read),
                bool_to_int(row.action_required),
                row.created_at,
            ],
        )
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
