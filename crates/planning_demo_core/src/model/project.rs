//! Project and milestone records.

use super::RowId;
use chrono::{NaiveDate, NaiveDateTime};

planning_enum! {
    pub enum ProjectStatus {
        Active => "active",
        Planning => "planning",
        OnHold => "on_hold",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

planning_enum! {
    /// Shared by projects and tasks.
    pub enum Priority {
        Critical => "critical",
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

planning_enum! {
    pub enum MilestoneStatus {
        NotStarted => "not_started",
        InProgress => "in_progress",
        Completed => "completed",
        Delayed => "delayed",
        AtRisk => "at_risk",
    }
}

planning_enum! {
    pub enum HealthStatus {
        Green => "green",
        Yellow => "yellow",
        Red => "red",
    }
}

impl MilestoneStatus {
    /// Health values a milestone in this status may report.
    pub fn health_candidates(self) -> &'static [HealthStatus] {
        match self {
            Self::Completed => &[HealthStatus::Green],
            Self::InProgress => &[HealthStatus::Green, HealthStatus::Yellow, HealthStatus::Red],
            Self::NotStarted => &[HealthStatus::Green, HealthStatus::Yellow],
            Self::Delayed => &[HealthStatus::Yellow, HealthStatus::Red],
            Self::AtRisk => &[HealthStatus::Red],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: RowId,
    pub organization_id: RowId,
    pub name: String,
    pub code_name: String,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub target_end_date: NaiveDate,
    /// Set only for completed projects.
    pub actual_end_date: Option<NaiveDate>,
    pub budget_allocated: f64,
    pub budget_consumed: f64,
    pub risk_score: u8,
    pub compliance_required: bool,
    pub client_facing: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub id: RowId,
    pub project_id: RowId,
    pub name: String,
    pub due_date: NaiveDate,
    pub status: MilestoneStatus,
    pub completion_percentage: u32,
    pub is_critical_path: bool,
    pub health_status: HealthStatus,
}
