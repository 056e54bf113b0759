//! Task records and the rows hanging off a task.

use super::project::Priority;
use super::RowId;
use chrono::{NaiveDate, NaiveDateTime};

planning_enum! {
    pub enum TaskStatus {
        Todo => "todo",
        InProgress => "in_progress",
        Blocked => "blocked",
        InReview => "in_review",
        Completed => "completed",
    }
}

impl TaskStatus {
    /// Statuses that accrue logged work.
    pub fn has_logged_work(self) -> bool {
        matches!(self, Self::Completed | Self::InReview | Self::InProgress)
    }

    /// Statuses for which actual hours are recorded.
    pub fn has_actual_hours(self) -> bool {
        matches!(self, Self::Completed | Self::InReview)
    }
}

planning_enum! {
    pub enum TaskType {
        Feature => "feature",
        Bug => "bug",
        Improvement => "improvement",
        Documentation => "documentation",
        Meeting => "meeting",
        Review => "review",
    }
}

planning_enum! {
    pub enum DependencyType {
        Blocks => "blocks",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: RowId,
    pub milestone_id: RowId,
    pub parent_task_id: Option<RowId>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: RowId,
    pub assigned_by: RowId,
    pub estimated_hours: f64,
    pub actual_hours: Option<f64>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub completed_at: Option<NaiveDateTime>,
    pub task_type: TaskType,
    pub requires_compliance_check: bool,
    pub is_blocking: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Directed edge: `task_id` waits on `depends_on_task_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDependency {
    pub id: RowId,
    pub task_id: RowId,
    pub depends_on_task_id: RowId,
    pub dependency_type: DependencyType,
    pub is_hard_dependency: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskComment {
    pub id: RowId,
    pub task_id: RowId,
    pub user_id: RowId,
    pub comment_text: String,
    pub is_blocker_reason: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTag {
    pub task_id: RowId,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkLog {
    pub id: RowId,
    pub task_id: RowId,
    pub user_id: RowId,
    pub hours_logged: f64,
    pub log_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}
