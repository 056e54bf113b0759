//! Resource request and notification records.

use super::RowId;
use chrono::NaiveDateTime;

planning_enum! {
    pub enum RequestType {
        AdditionalDeveloper => "additional_developer",
        Overtime => "overtime",
        Contractor => "contractor",
        Tool => "tool",
        Budget => "budget",
    }
}

planning_enum! {
    pub enum Urgency {
        Immediate => "immediate",
        ThisWeek => "this_week",
        NextSprint => "next_sprint",
    }
}

planning_enum! {
    pub enum RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Fulfilled => "fulfilled",
    }
}

planning_enum! {
    pub enum NotificationType {
        TaskAssigned => "task_assigned",
        BlockerCreated => "blocker_created",
        Mention => "mention",
        DeadlineApproaching => "deadline_approaching",
        StatusRequest => "status_request",
    }
}

planning_enum! {
    /// Table a notification points into via `entity_id`.
    pub enum EntityType {
        Task => "task",
        Project => "project",
        Milestone => "milestone",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub id: RowId,
    pub requested_by: RowId,
    pub project_id: RowId,
    pub request_type: RequestType,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: RowId,
    pub user_id: RowId,
    pub kind: NotificationType,
    pub entity_type: EntityType,
    pub entity_id: RowId,
    pub message: String,
    pub is_read: bool,
    pub action_required: bool,
    pub created_at: NaiveDateTime,
}
