//! Personal assistant: one contributor's focus list, the people waiting on
//! them and their recent logged work.

use super::format::{priority_icon, truncate, write_actions, write_components, TaskUrgency};
use super::ReportResult;
use crate::model::RowId;
use crate::repo::report_repo::ReportQueries;
use chrono::NaiveDate;
use std::io::Write;

const FOCUS_TOP: usize = 5;
const RECENT_LOGS_SHOWN: usize = 3;

const ACTIONS: [(&str, &str); 6] = [
    ("Start Work", "Begin focus mode with timer"),
    ("I'm Blocked", "Generate blocker report"),
    ("Need Help", "Find available team members"),
    ("Complete & Next", "Mark done and auto-pick next task"),
    ("Quick Update", "Send status to stakeholders"),
    ("Focus Mode", "Hide distractions, show only current task"),
];

const COMPONENTS: [&str; 5] = [
    "Kanban-style personal board with drag-to-update status",
    "Integrated timer with automatic work logging",
    "Context-aware documentation and code links",
    "Quick communication panel for stakeholders",
    "AI suggestions for next task based on skills/priority",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalRequest {
    pub viewer: String,
    /// Explicit target user; `None` picks the first individual contributor.
    pub user_id: Option<RowId>,
}

impl Default for PersonalRequest {
    fn default() -> Self {
        Self {
            viewer: "James Liu (Developer)".to_string(),
            user_id: None,
        }
    }
}

pub(crate) fn render(
    queries: &ReportQueries<'_>,
    today: NaiveDate,
    request: &PersonalRequest,
    out: &mut impl Write,
) -> ReportResult<()> {
    writeln!(out, "\n🎯 === PERSONAL ASSISTANT for {} ===", request.viewer)?;
    writeln!(out, "VIEW: The Execution Pod")?;
    writeln!(
        out,
        "QUERY: 'What should I focus on today and let me get started'"
    )?;

    let profile = match request.user_id {
        Some(user_id) => queries.user_profile(user_id)?,
        None => queries.default_developer()?,
    };
    let Some(user) = profile else {
        match request.user_id {
            Some(user_id) => writeln!(out, "❌ User {user_id} not found")?,
            None => writeln!(out, "❌ No developer users found")?,
        }
        return Ok(());
    };
    writeln!(
        out,
        "📱 USER: {} ({}, {})",
        user.full_name, user.role, user.specialization
    )?;

    let tasks = queries.focus_tasks(user.id)?;
    writeln!(out, "\n📋 TODAY'S FOCUS ({} active tasks):", tasks.len())?;
    if tasks.is_empty() {
        writeln!(out, "  • No active tasks! Time to pick up something new 🎉")?;
    }
    for (position, task) in tasks.iter().take(FOCUS_TOP).enumerate() {
        let urgency = TaskUrgency::classify(task.due_date, today);
        writeln!(
            out,
            "  {}. {} {}",
            position + 1,
            priority_icon(task.priority),
            truncate(&task.title, 60)
        )?;
        writeln!(
            out,
            "     Project: {} → {}",
            task.project_name, task.milestone_name
        )?;
        writeln!(
            out,
            "     Status: {} | Priority: {} | Est: {:.1}h",
            task.status, task.priority, task.estimated_hours
        )?;
        writeln!(
            out,
            "     Due: {} {} | Assigned by: {}",
            task.due_date,
            urgency.icon(),
            task.assigned_by_name
        )?;
        writeln!(out)?;
    }

    let waiting = queries.waiting_on_user(user.id)?;
    writeln!(out, "\n👥 PEOPLE WAITING ON MY WORK ({} found):", waiting.len())?;
    if waiting.is_empty() {
        writeln!(out, "  • No one is blocked by your work!")?;
    }
    for entry in &waiting {
        writeln!(
            out,
            "  • {} is waiting for: {}",
            entry.waiting_user,
            truncate(&entry.my_task, 50)
        )?;
        writeln!(out, "    Their task: {}", truncate(&entry.waiting_task, 50))?;
        writeln!(
            out,
            "    My task status: {} | Dependency: {}",
            entry.my_task_status, entry.dependency_type
        )?;
    }

    let logs = queries.recent_work_logs(user.id, today)?;
    writeln!(out, "\n📊 RECENT ACTIVITY (last 7 days):")?;
    if logs.is_empty() {
        writeln!(out, "  • No recent work logged")?;
    } else {
        let total_hours = queries.recent_hours_logged(user.id, today)?;
        writeln!(out, "  • Total logged: {total_hours:.1} hours in the last 7 days")?;
        for work_log in logs.iter().take(RECENT_LOGS_SHOWN) {
            writeln!(
                out,
                "  • {}: {:.1}h on {}",
                work_log.log_date,
                work_log.hours_logged,
                truncate(&work_log.task_title, 40)
            )?;
        }
    }

    write_actions(out, "🛠️", &ACTIONS)?;
    write_components(out, &COMPONENTS)?;
    Ok(())
}
