//! Read-side queries behind the persona reports.
//!
//! # Responsibility
//! - Run the joins and aggregations each persona view needs.
//! - Map rows into typed read models; stored vocabulary text is parsed back
//!   into model enums.
//!
//! # Invariants
//! - Every query is a plain `SELECT`.
//! - "Today" is always a bound parameter, never SQLite's own clock, so
//!   reports are reproducible against a fixed reference date.
//! - Row order is fully determined (ties broken by id).

use super::{RepoError, RepoResult};
use crate::model::org::{DepartmentType, Specialization, UserRole};
use crate::model::project::{HealthStatus, MilestoneStatus, Priority, ProjectStatus};
use crate::model::task::{DependencyType, TaskStatus};
use crate::model::RowId;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Params, Row};

/// Days covered by the personal "recent activity" window.
const RECENT_WINDOW_DAYS: i64 = 7;

/// Portfolio-wide project KPIs.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioKpis {
    pub total_projects: i64,
    pub active_projects: i64,
    pub high_risk_projects: i64,
    /// Rounded to one decimal; `None` without projects.
    pub avg_risk_score: Option<f64>,
    pub total_budget: f64,
    pub consumed_budget: f64,
}

impl PortfolioKpis {
    /// Consumed share of the allocated budget in percent, 0 without budget.
    pub fn budget_utilization(&self) -> f64 {
        if self.total_budget > 0.0 {
            self.consumed_budget / self.total_budget * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneHealthRow {
    pub status: MilestoneStatus,
    pub health_status: HealthStatus,
    pub count: i64,
    /// Share of all milestones, one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriticalBlocker {
    pub task_id: RowId,
    pub title: String,
    pub status: TaskStatus,
    pub assigned_to: String,
    pub project_name: String,
    pub blocker_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub id: RowId,
    pub name: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub target_end_date: NaiveDate,
    pub risk_score: i64,
}

/// One dependency edge with both endpoint owners resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdgeRow {
    pub blocking_task_id: RowId,
    pub blocking_task: String,
    pub blocking_status: TaskStatus,
    pub blocker_name: String,
    pub blocker_email: String,
    pub blocked_task: String,
    pub blocked_name: String,
    pub dependency_type: DependencyType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockedTaskRow {
    pub id: RowId,
    pub title: String,
    pub assigned_to: String,
    pub email: String,
    pub blocker_reason: Option<String>,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserAllocation {
    pub user_id: RowId,
    pub full_name: String,
    pub role: UserRole,
    pub department: String,
    pub availability_hours_per_week: i64,
    pub total_allocation: i64,
    pub num_teams: i64,
}

impl UserAllocation {
    /// Allocated above 100% or on reduced availability.
    pub fn is_overloaded(&self) -> bool {
        self.total_allocation > 100 || self.availability_hours_per_week < 40
    }
}

/// Open work (todo, in progress, blocked) of one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWorkload {
    pub user_id: RowId,
    pub full_name: String,
    pub active_tasks: i64,
    pub pending_hours: f64,
    pub active_hours: f64,
    pub total_estimated_hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillAvailability {
    pub specialization: Specialization,
    pub role: UserRole,
    pub people_count: i64,
    pub avg_availability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: RowId,
    pub full_name: String,
    pub role: UserRole,
    pub specialization: Specialization,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusTask {
    pub id: RowId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub estimated_hours: f64,
    pub due_date: NaiveDate,
    pub milestone_name: String,
    pub project_name: String,
    pub assigned_by_name: String,
}

/// Someone whose task depends on one of the viewer's unfinished tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitingOnUser {
    pub waiting_task: String,
    pub waiting_user: String,
    pub my_task: String,
    pub my_task_status: TaskStatus,
    pub dependency_type: DependencyType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentWorkLog {
    pub log_date: NaiveDate,
    pub hours_logged: f64,
    pub description: Option<String>,
    pub task_title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentProgress {
    pub department: String,
    pub kind: DepartmentType,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub blocked_tasks: i64,
    pub active_tasks: i64,
    /// completed = 100, in progress = 50, else 0; averaged, one decimal.
    pub progress_pct: f64,
}

/// Dependency crossing department boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct HandoffRow {
    pub giver_department: String,
    pub receiver_department: String,
    pub giver_task: String,
    pub receiver_task: String,
    pub giver_status: TaskStatus,
    pub receiver_status: TaskStatus,
    pub giver_name: String,
    pub receiver_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamComment {
    pub department: String,
    pub commenter: String,
    pub comment_text: String,
    pub created_at: NaiveDateTime,
    pub task_title: String,
}

/// Read-only query surface over a planning database.
pub struct ReportQueries<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ReportQueries<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn portfolio_kpis(&self) -> RepoResult<PortfolioKpis> {
        let kpis = self.conn.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN status = 'active' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN risk_score >= 8 THEN 1 ELSE 0 END), 0),
                ROUND(AVG(risk_score), 1),
                COALESCE(SUM(budget_allocated), 0.0),
                COALESCE(SUM(budget_consumed), 0.0)
             FROM projects;",
            [],
            |row| {
                Ok(PortfolioKpis {
                    total_projects: row.get(0)?,
                    active_projects: row.get(1)?,
                    high_risk_projects: row.get(2)?,
                    avg_risk_score: row.get(3)?,
                    total_budget: row.get(4)?,
                    consumed_budget: row.get(5)?,
                })
            },
        )?;
        Ok(kpis)
    }

    pub fn milestone_health(&self) -> RepoResult<Vec<MilestoneHealthRow>> {
        self.collect(
            "SELECT
                status,
                health_status,
                COUNT(*) AS count,
                ROUND(COUNT(*) * 100.0 / SUM(COUNT(*)) OVER (), 1) AS percentage
             FROM milestones
             GROUP BY status, health_status
             ORDER BY status, health_status;",
            [],
            |row| {
                Ok(MilestoneHealthRow {
                    status: vocab(row, "status", MilestoneStatus::parse)?,
                    health_status: vocab(row, "health_status", HealthStatus::parse)?,
                    count: row.get("count")?,
                    percentage: row.get("percentage")?,
                })
            },
        )
    }

    /// Blocked critical tasks with their blocker comment, if any.
    pub fn critical_blockers(&self, limit: u32) -> RepoResult<Vec<CriticalBlocker>> {
        self.collect(
            "SELECT
                t.id,
                t.title,
                t.status,
                u.full_name AS assigned_to,
                p.name AS project_name,
                tc.comment_text AS blocker_reason
             FROM tasks t
             JOIN users u ON t.assigned_to = u.id
             JOIN milestones m ON t.milestone_id = m.id
             JOIN projects p ON m.project_id = p.id
             LEFT JOIN task_comments tc ON t.id = tc.task_id AND tc.is_blocker_reason = 1
             WHERE t.status = 'blocked' AND t.priority = 'critical'
             ORDER BY t.id, tc.id
             LIMIT ?1;",
            [i64::from(limit)],
            |row| {
                Ok(CriticalBlocker {
                    task_id: row.get("id")?,
                    title: row.get("title")?,
                    status: vocab(row, "status", TaskStatus::parse)?,
                    assigned_to: row.get("assigned_to")?,
                    project_name: row.get("project_name")?,
                    blocker_reason: row.get("blocker_reason")?,
                })
            },
        )
    }

    /// First project (by id) whose name contains `needle`.
    ///
    /// Matching uses SQLite `LIKE`, so ASCII letters compare case-insensitively.
    pub fn find_project(&self, needle: &str) -> RepoResult<Option<ProjectSummary>> {
        let pattern = format!("%{}%", escape_like(needle));
        let mut found = self.collect(
            "SELECT id, name, status, priority, start_date, target_end_date, risk_score
             FROM projects
             WHERE name LIKE ?1 ESCAPE '\\'
             ORDER BY id
             LIMIT 1;",
            [pattern],
            |row| {
                Ok(ProjectSummary {
                    id: row.get("id")?,
                    name: row.get("name")?,
                    status: vocab(row, "status", ProjectStatus::parse)?,
                    priority: vocab(row, "priority", Priority::parse)?,
                    start_date: row.get("start_date")?,
                    target_end_date: row.get("target_end_date")?,
                    risk_score: row.get("risk_score")?,
                })
            },
        )?;
        Ok(found.pop())
    }

    pub fn project_names(&self) -> RepoResult<Vec<String>> {
        self.collect("SELECT name FROM projects ORDER BY name, id;", [], |row| {
            Ok(row.get(0)?)
        })
    }

    /// Dependency edges where either endpoint belongs to `project_id`.
    pub fn project_dependency_edges(&self, project_id: RowId) -> RepoResult<Vec<DependencyEdgeRow>> {
        self.collect(
            "SELECT
                blocking_task.id AS blocking_task_id,
                blocking_task.title AS blocking_task,
                blocking_task.status AS blocking_status,
                blocker_user.full_name AS blocker_name,
                blocker_user.email AS blocker_email,
                blocked_task.title AS blocked_task,
                blocked_user.full_name AS blocked_name,
                td.dependency_type
             FROM task_dependencies td
             JOIN tasks blocking_task ON td.depends_on_task_id = blocking_task.id
             JOIN tasks blocked_task ON td.task_id = blocked_task.id
             JOIN milestones m1 ON blocking_task.milestone_id = m1.id
             JOIN milestones m2 ON blocked_task.milestone_id = m2.id
             JOIN users blocker_user ON blocking_task.assigned_to = blocker_user.id
             JOIN users blocked_user ON blocked_task.assigned_to = blocked_user.id
             WHERE m1.project_id = ?1 OR m2.project_id = ?1
             ORDER BY td.dependency_type, blocking_task.status, td.id;",
            [project_id],
            |row| {
                Ok(DependencyEdgeRow {
                    blocking_task_id: row.get("blocking_task_id")?,
                    blocking_task: row.get("blocking_task")?,
                    blocking_status: vocab(row, "blocking_status", TaskStatus::parse)?,
                    blocker_name: row.get("blocker_name")?,
                    blocker_email: row.get("blocker_email")?,
                    blocked_task: row.get("blocked_task")?,
                    blocked_name: row.get("blocked_name")?,
                    dependency_type: vocab(row, "dependency_type", DependencyType::parse)?,
                })
            },
        )
    }

    /// Blocked tasks of one project, earliest due first.
    pub fn project_blocked_tasks(&self, project_id: RowId) -> RepoResult<Vec<BlockedTaskRow>> {
        self.collect(
            "SELECT
                t.id,
                t.title,
                u.full_name AS assigned_to,
                u.email,
                tc.comment_text AS blocker_reason,
                t.due_date
             FROM tasks t
             JOIN milestones m ON t.milestone_id = m.id
             JOIN users u ON t.assigned_to = u.id
             LEFT JOIN task_comments tc ON t.id = tc.task_id AND tc.is_blocker_reason = 1
             WHERE m.project_id = ?1 AND t.status = 'blocked'
             ORDER BY t.due_date, t.id, tc.id;",
            [project_id],
            |row| {
                Ok(BlockedTaskRow {
                    id: row.get("id")?,
                    title: row.get("title")?,
                    assigned_to: row.get("assigned_to")?,
                    email: row.get("email")?,
                    blocker_reason: row.get("blocker_reason")?,
                    due_date: row.get("due_date")?,
                })
            },
        )
    }

    /// Summed team allocation per user, highest first.
    pub fn user_allocations(&self) -> RepoResult<Vec<UserAllocation>> {
        self.collect(
            "SELECT
                u.id,
                u.full_name,
                u.role,
                d.name AS department,
                u.availability_hours_per_week,
                SUM(tm.allocation_percentage) AS total_allocation,
                COUNT(DISTINCT tm.team_id) AS num_teams
             FROM users u
             JOIN departments d ON u.department_id = d.id
             JOIN team_members tm ON u.id = tm.user_id
             GROUP BY u.id, u.full_name, u.role, d.name, u.availability_hours_per_week
             ORDER BY total_allocation DESC, u.id;",
            [],
            |row| {
                Ok(UserAllocation {
                    user_id: row.get("id")?,
                    full_name: row.get("full_name")?,
                    role: vocab(row, "role", UserRole::parse)?,
                    department: row.get("department")?,
                    availability_hours_per_week: row.get("availability_hours_per_week")?,
                    total_allocation: row.get("total_allocation")?,
                    num_teams: row.get("num_teams")?,
                })
            },
        )
    }

    /// Users with open work, largest estimate first.
    pub fn open_workloads(&self) -> RepoResult<Vec<UserWorkload>> {
        self.collect(
            "SELECT
                u.id,
                u.full_name,
                COUNT(t.id) AS active_tasks,
                COALESCE(SUM(CASE WHEN t.status = 'todo' THEN t.estimated_hours ELSE 0.0 END), 0.0)
                    AS pending_hours,
                COALESCE(SUM(CASE WHEN t.status = 'in_progress' THEN t.estimated_hours ELSE 0.0 END), 0.0)
                    AS active_hours,
                COALESCE(SUM(t.estimated_hours), 0.0) AS total_estimated_hours
             FROM users u
             JOIN tasks t ON u.id = t.assigned_to
                AND t.status IN ('todo', 'in_progress', 'blocked')
             GROUP BY u.id, u.full_name
             ORDER BY total_estimated_hours DESC, u.id;",
            [],
            |row| {
                Ok(UserWorkload {
                    user_id: row.get("id")?,
                    full_name: row.get("full_name")?,
                    active_tasks: row.get("active_tasks")?,
                    pending_hours: row.get("pending_hours")?,
                    active_hours: row.get("active_hours")?,
                    total_estimated_hours: row.get("total_estimated_hours")?,
                })
            },
        )
    }

    pub fn skills_availability(&self) -> RepoResult<Vec<SkillAvailability>> {
        self.collect(
            "SELECT
                specialization,
                role,
                COUNT(*) AS people_count,
                AVG(availability_hours_per_week) AS avg_availability
             FROM users
             GROUP BY specialization, role
             ORDER BY specialization, people_count DESC, role;",
            [],
            |row| {
                Ok(SkillAvailability {
                    specialization: vocab(row, "specialization", Specialization::parse)?,
                    role: vocab(row, "role", UserRole::parse)?,
                    people_count: row.get("people_count")?,
                    avg_availability: row.get("avg_availability")?,
                })
            },
        )
    }

    /// First individual contributor (junior, senior or lead) by id.
    pub fn default_developer(&self) -> RepoResult<Option<UserProfile>> {
        let mut found = self.collect(
            "SELECT id, full_name, role, specialization
             FROM users
             WHERE role IN ('junior', 'senior', 'lead')
             ORDER BY id
             LIMIT 1;",
            [],
            parse_user_profile,
        )?;
        Ok(found.pop())
    }

    pub fn user_profile(&self, user_id: RowId) -> RepoResult<Option<UserProfile>> {
        let mut found = self.collect(
            "SELECT id, full_name, role, specialization FROM users WHERE id = ?1;",
            [user_id],
            parse_user_profile,
        )?;
        Ok(found.pop())
    }

    /// Open tasks of one user by priority rank, then due date.
    pub fn focus_tasks(&self, user_id: RowId) -> RepoResult<Vec<FocusTask>> {
        self.collect(
            "SELECT
                t.id,
                t.title,
                t.status,
                t.priority,
                t.estimated_hours,
                t.due_date,
                m.name AS milestone_name,
                p.name AS project_name,
                assigner.full_name AS assigned_by_name
             FROM tasks t
             JOIN milestones m ON t.milestone_id = m.id
             JOIN projects p ON m.project_id = p.id
             JOIN users assigner ON t.assigned_by = assigner.id
             WHERE t.assigned_to = ?1
               AND t.status IN ('todo', 'in_progress', 'blocked')
             ORDER BY
                CASE t.priority
                    WHEN 'critical' THEN 1
                    WHEN 'high' THEN 2
                    WHEN 'medium' THEN 3
                    ELSE 4
                END,
                t.due_date,
                t.id;",
            [user_id],
            |row| {
                Ok(FocusTask {
                    id: row.get("id")?,
                    title: row.get("title")?,
                    status: vocab(row, "status", TaskStatus::parse)?,
                    priority: vocab(row, "priority", Priority::parse)?,
                    estimated_hours: row.get("estimated_hours")?,
                    due_date: row.get("due_date")?,
                    milestone_name: row.get("milestone_name")?,
                    project_name: row.get("project_name")?,
                    assigned_by_name: row.get("assigned_by_name")?,
                })
            },
        )
    }

    pub fn waiting_on_user(&self, user_id: RowId) -> RepoResult<Vec<WaitingOnUser>> {
        self.collect(
            "SELECT
                waiting_task.title AS waiting_task,
                waiting_user.full_name AS waiting_user,
                my_task.title AS my_task,
                my_task.status AS my_task_status,
                td.dependency_type
             FROM task_dependencies td
             JOIN tasks my_task ON td.depends_on_task_id = my_task.id
             JOIN tasks waiting_task ON td.task_id = waiting_task.id
             JOIN users waiting_user ON waiting_task.assigned_to = waiting_user.id
             WHERE my_task.assigned_to = ?1
               AND my_task.status != 'completed'
             ORDER BY waiting_task.due_date, td.id;",
            [user_id],
            |row| {
                Ok(WaitingOnUser {
                    waiting_task: row.get("waiting_task")?,
                    waiting_user: row.get("waiting_user")?,
                    my_task: row.get("my_task")?,
                    my_task_status: vocab(row, "my_task_status", TaskStatus::parse)?,
                    dependency_type: vocab(row, "dependency_type", DependencyType::parse)?,
                })
            },
        )
    }

    /// Up to five logs of the last seven days, newest first.
    pub fn recent_work_logs(&self, user_id: RowId, today: NaiveDate) -> RepoResult<Vec<RecentWorkLog>> {
        let since = today - Duration::days(RECENT_WINDOW_DAYS);
        self.collect(
            "SELECT
                wl.log_date,
                wl.hours_logged,
                wl.description,
                t.title AS task_title
             FROM work_logs wl
             JOIN tasks t ON wl.task_id = t.id
             WHERE wl.user_id = ?1
               AND wl.log_date >= ?2
             ORDER BY wl.log_date DESC, wl.id DESC
             LIMIT 5;",
            rusqlite::params![user_id, since],
            |row| {
                Ok(RecentWorkLog {
                    log_date: row.get("log_date")?,
                    hours_logged: row.get("hours_logged")?,
                    description: row.get("description")?,
                    task_title: row.get("task_title")?,
                })
            },
        )
    }

    /// Hours logged by `user_id` since `today` minus seven days, inclusive.
    pub fn recent_hours_logged(&self, user_id: RowId, today: NaiveDate) -> RepoResult<f64> {
        let since = today - Duration::days(RECENT_WINDOW_DAYS);
        let total = self.conn.query_row(
            "SELECT COALESCE(SUM(hours_logged), 0.0)
             FROM work_logs
             WHERE user_id = ?1
               AND log_date >= ?2;",
            rusqlite::params![user_id, since],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Task progress of one project grouped by the assignee's department.
    pub fn department_progress(&self, project_id: RowId) -> RepoResult<Vec<DepartmentProgress>> {
        self.collect(
            "SELECT
                d.name AS department,
                d.type AS kind,
                COUNT(DISTINCT t.id) AS total_tasks,
                COUNT(DISTINCT CASE WHEN t.status = 'completed' THEN t.id END) AS completed_tasks,
                COUNT(DISTINCT CASE WHEN t.status = 'blocked' THEN t.id END) AS blocked_tasks,
                COUNT(DISTINCT CASE WHEN t.status = 'in_progress' THEN t.id END) AS active_tasks,
                ROUND(AVG(CASE
                    WHEN t.status = 'completed' THEN 100.0
                    WHEN t.status = 'in_progress' THEN 50.0
                    ELSE 0.0
                END), 1) AS progress_pct
             FROM departments d
             JOIN users u ON d.id = u.department_id
             JOIN tasks t ON u.id = t.assigned_to
             JOIN milestones m ON t.milestone_id = m.id
             WHERE m.project_id = ?1
             GROUP BY d.id, d.name, d.type
             ORDER BY progress_pct DESC, d.id;",
            [project_id],
            |row| {
                Ok(DepartmentProgress {
                    department: row.get("department")?,
                    kind: vocab(row, "kind", DepartmentType::parse)?,
                    total_tasks: row.get("total_tasks")?,
                    completed_tasks: row.get("completed_tasks")?,
                    blocked_tasks: row.get("blocked_tasks")?,
                    active_tasks: row.get("active_tasks")?,
                    progress_pct: row.get("progress_pct")?,
                })
            },
        )
    }

    /// Dependencies touching `project_id` whose owners sit in different
    /// departments.
    pub fn cross_team_handoffs(&self, project_id: RowId) -> RepoResult<Vec<HandoffRow>> {
        self.collect(
            "SELECT
                giver_dept.name AS giver_department,
                receiver_dept.name AS receiver_department,
                giver_task.title AS giver_task,
                receiver_task.title AS receiver_task,
                giver_task.status AS giver_status,
                receiver_task.status AS receiver_status,
                giver_user.full_name AS giver_name,
                receiver_user.full_name AS receiver_name
             FROM task_dependencies td
             JOIN tasks giver_task ON td.depends_on_task_id = giver_task.id
             JOIN tasks receiver_task ON td.task_id = receiver_task.id
             JOIN users giver_user ON giver_task.assigned_to = giver_user.id
             JOIN users receiver_user ON receiver_task.assigned_to = receiver_user.id
             JOIN departments giver_dept ON giver_user.department_id = giver_dept.id
             JOIN departments receiver_dept ON receiver_user.department_id = receiver_dept.id
             JOIN milestones gm ON giver_task.milestone_id = gm.id
             JOIN milestones rm ON receiver_task.milestone_id = rm.id
             WHERE (gm.project_id = ?1 OR rm.project_id = ?1)
               AND giver_dept.id != receiver_dept.id
             ORDER BY giver_dept.name, receiver_dept.name, td.id;",
            [project_id],
            |row| {
                Ok(HandoffRow {
                    giver_department: row.get("giver_department")?,
                    receiver_department: row.get("receiver_department")?,
                    giver_task: row.get("giver_task")?,
                    receiver_task: row.get("receiver_task")?,
                    giver_status: vocab(row, "giver_status", TaskStatus::parse)?,
                    receiver_status: vocab(row, "receiver_status", TaskStatus::parse)?,
                    giver_name: row.get("giver_name")?,
                    receiver_name: row.get("receiver_name")?,
                })
            },
        )
    }

    /// Comments on the project's tasks from the last seven days, newest first.
    pub fn recent_team_comments(
        &self,
        project_id: RowId,
        today: NaiveDate,
        limit: u32,
    ) -> RepoResult<Vec<TeamComment>> {
        let since = (today - Duration::days(7)).and_hms_opt(0, 0, 0);
        self.collect(
            "SELECT
                d.name AS department,
                u.full_name AS commenter,
                tc.comment_text,
                tc.created_at,
                t.title AS task_title
             FROM task_comments tc
             JOIN users u ON tc.user_id = u.id
             JOIN departments d ON u.department_id = d.id
             JOIN tasks t ON tc.task_id = t.id
             JOIN milestones m ON t.milestone_id = m.id
             WHERE m.project_id = ?1
               AND tc.created_at >= ?2
             ORDER BY tc.created_at DESC, tc.id DESC
             LIMIT ?3;",
            rusqlite::params![project_id, since, i64::from(limit)],
            |row| {
                Ok(TeamComment {
                    department: row.get("department")?,
                    commenter: row.get("commenter")?,
                    comment_text: row.get("comment_text")?,
                    created_at: row.get("created_at")?,
                    task_title: row.get("task_title")?,
                })
            },
        )
    }

    fn collect<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        parse: impl Fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }
        Ok(items)
    }
}

fn parse_user_profile(row: &Row<'_>) -> RepoResult<UserProfile> {
    Ok(UserProfile {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        role: vocab(row, "role", UserRole::parse)?,
        specialization: vocab(row, "specialization", Specialization::parse)?,
    })
}

/// Reads a text column and parses it into a model vocabulary.
fn vocab<T>(row: &Row<'_>, column: &str, parse: fn(&str) -> Option<T>) -> RepoResult<T> {
    let text: String = row.get(column)?;
    parse(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid value `{text}` in column {column}"))
    })
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_like, ReportQueries};
    use crate::db::open_db_in_memory;
    use crate::repo::RepoError;

    #[test]
    fn escape_like_guards_wildcards() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("Mobile App"), "Mobile App");
    }

    #[test]
    fn empty_database_yields_zero_kpis_and_no_rows() {
        let conn = open_db_in_memory().unwrap();
        let queries = ReportQueries::new(&conn);

        let kpis = queries.portfolio_kpis().unwrap();
        assert_eq!(kpis.total_projects, 0);
        assert_eq!(kpis.avg_risk_score, None);
        assert_eq!(kpis.budget_utilization(), 0.0);
        assert!(queries.milestone_health().unwrap().is_empty());
        assert!(queries.find_project("Portal").unwrap().is_none());
        assert!(queries.default_developer().unwrap().is_none());
    }

    #[test]
    fn unknown_vocabulary_text_is_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "INSERT INTO organizations (id, name, created_at) VALUES (1, 'Org', '2026-01-01 00:00:00');
             INSERT INTO departments (id, organization_id, name, type) VALUES (1, 1, 'Eng', 'engineering');
             INSERT INTO users (
                id, organization_id, department_id, email, full_name, role,
                specialization, availability_hours_per_week, timezone, created_at
             ) VALUES (1, 1, 1, 'a@b.c', 'A B', 'wizard', 'backend', 40, 'PST', '2026-01-01 00:00:00');",
        )
        .unwrap();

        let err = ReportQueries::new(&conn).user_profile(1).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("wizard")));
    }
}
