//! Organization, department, user and team records.

use super::RowId;
use chrono::NaiveDateTime;

planning_enum! {
    /// Department category; drives specializations and team layout.
    pub enum DepartmentType {
        Engineering => "engineering",
        Design => "design",
        Product => "product",
        Sales => "sales",
        Operations => "operations",
        Finance => "finance",
        Compliance => "compliance",
    }
}

planning_enum! {
    pub enum UserRole {
        Ceo => "ceo",
        Vp => "vp",
        Manager => "manager",
        Lead => "lead",
        Senior => "senior",
        Junior => "junior",
        Intern => "intern",
    }
}

impl UserRole {
    /// Roles allowed to assign tasks and raise resource requests.
    pub fn can_assign_work(self) -> bool {
        matches!(self, Self::Manager | Self::Lead | Self::Vp)
    }

    /// Roles eligible to lead a team.
    pub fn can_lead_team(self) -> bool {
        matches!(self, Self::Lead | Self::Manager | Self::Senior)
    }
}

planning_enum! {
    pub enum Specialization {
        Frontend => "frontend",
        Backend => "backend",
        Fullstack => "fullstack",
        Devops => "devops",
        Data => "data",
        UiUx => "ui_ux",
        Product => "product",
        Business => "business",
    }
}

planning_enum! {
    pub enum Timezone {
        Pst => "PST",
        Est => "EST",
        Cst => "CST",
        Gmt => "GMT",
        Ist => "IST",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: RowId,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: RowId,
    pub organization_id: RowId,
    pub name: String,
    pub kind: DepartmentType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: RowId,
    pub organization_id: RowId,
    pub department_id: RowId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub specialization: Specialization,
    pub availability_hours_per_week: u32,
    pub timezone: Timezone,
    pub created_at: NaiveDateTime,
    /// Zero-based generation order; overload patterns refer to it.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: RowId,
    pub department_id: RowId,
    pub name: String,
    pub lead_user_id: Option<RowId>,
}

/// Allocation of one user to one team, in percent of their time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub team_id: RowId,
    pub user_id: RowId,
    pub allocation_percentage: u32,
}
