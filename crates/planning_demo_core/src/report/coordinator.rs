//! Cross-functional coordinator: one project seen across departments.

use super::format::{
    handoff_status, progress_bar, swimlane_icon, truncate, write_actions, write_components,
};
use super::ReportResult;
use crate::repo::report_repo::ReportQueries;
use chrono::NaiveDate;
use std::io::Write;

const RECENT_COMMENT_LIMIT: u32 = 5;

const ACTIONS: [(&str, &str); 6] = [
    ("Send Status Request", "Ask all teams for updates"),
    ("Create Handoff Meeting", "Schedule team-to-team sync"),
    ("Flag Handoff Ready", "Notify receiving team"),
    ("Escalate Blocker", "Get management help"),
    ("Cross-Team Task", "Create shared deliverable"),
    ("Bulk Update", "Change multiple team milestones"),
];

const COMPONENTS: [&str; 5] = [
    "Swimlane view with team progress bars",
    "Interactive handoff timeline with status indicators",
    "Team communication threads per deliverable",
    "Drag-and-drop milestone adjustment interface",
    "Notification center for cross-team updates",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorRequest {
    pub viewer: String,
    /// Matched as a substring of the project name.
    pub project_name: String,
}

impl Default for CoordinatorRequest {
    fn default() -> Self {
        Self {
            viewer: "Ana Silva (Product Manager)".to_string(),
            project_name: "Customer Portal".to_string(),
        }
    }
}

pub(crate) fn render(
    queries: &ReportQueries<'_>,
    today: NaiveDate,
    request: &CoordinatorRequest,
    out: &mut impl Write,
) -> ReportResult<()> {
    writeln!(
        out,
        "\n🎼 === CROSS-FUNCTIONAL COORDINATOR for {} ===",
        request.viewer
    )?;
    writeln!(out, "VIEW: The Orchestration Hub")?;
    writeln!(
        out,
        "QUERY: 'Show me the {} project across all teams'",
        request.project_name
    )?;

    let Some(project) = queries.find_project(&request.project_name)? else {
        writeln!(out, "❌ Project '{}' not found", request.project_name)?;
        return Ok(());
    };

    writeln!(out, "\n🚀 PROJECT: {}", project.name)?;
    writeln!(
        out,
        "  Status: {} | Priority: {}",
        project.status, project.priority
    )?;
    writeln!(
        out,
        "  Timeline: {} → {}",
        project.start_date, project.target_end_date
    )?;

    writeln!(out, "\n📊 TEAM PROGRESS SWIMLANES:")?;
    for lane in queries.department_progress(project.id)? {
        writeln!(
            out,
            "  {} {}: {} {:.1}%",
            swimlane_icon(lane.blocked_tasks, lane.progress_pct),
            lane.department,
            progress_bar(lane.progress_pct),
            lane.progress_pct
        )?;
        writeln!(
            out,
            "     Tasks: {}/{} done, {} active, {} blocked",
            lane.completed_tasks, lane.total_tasks, lane.active_tasks, lane.blocked_tasks
        )?;
    }

    let handoffs = queries.cross_team_handoffs(project.id)?;
    writeln!(out, "\n🔄 CROSS-TEAM HANDOFFS ({} found):", handoffs.len())?;
    if handoffs.is_empty() {
        writeln!(out, "  • No cross-team dependencies found")?;
    }
    for handoff in &handoffs {
        writeln!(
            out,
            "  • {} → {} {}",
            handoff.giver_department,
            handoff.receiver_department,
            handoff_status(handoff.giver_status)
        )?;
        writeln!(
            out,
            "    Gives: {} ({}) - {}",
            truncate(&handoff.giver_task, 50),
            handoff.giver_status,
            handoff.giver_name
        )?;
        writeln!(
            out,
            "    Receives: {} ({}) - {}",
            truncate(&handoff.receiver_task, 50),
            handoff.receiver_status,
            handoff.receiver_name
        )?;
        writeln!(out)?;
    }

    writeln!(out, "\n💬 RECENT TEAM COMMUNICATION:")?;
    let comments = queries.recent_team_comments(project.id, today, RECENT_COMMENT_LIMIT)?;
    if comments.is_empty() {
        writeln!(out, "  • No recent comments")?;
    }
    for comment in &comments {
        writeln!(
            out,
            "  • [{}] {}: {}",
            comment.department,
            comment.commenter,
            truncate(&comment.comment_text, 60)
        )?;
        writeln!(
            out,
            "    On task: {} | {}",
            truncate(&comment.task_title, 40),
            comment.created_at
        )?;
    }

    write_actions(out, "🛠️", &ACTIONS)?;
    write_components(out, &COMPONENTS)?;
    Ok(())
}
