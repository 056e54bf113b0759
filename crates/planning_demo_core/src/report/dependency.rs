//! Dependency detective: what blocks one project and who owns it.

use super::format::{truncate, write_actions, write_components};
use super::ReportResult;
use crate::repo::report_repo::ReportQueries;
use std::io::Write;

const ACTIONS: [(&str, &str); 6] = [
    ("Message Owner", "Direct message to blocking task owner"),
    ("Create Workaround", "Generate alternative approach task"),
    ("Escalate", "Notify manager about critical blocker"),
    ("Schedule Sync", "Book time with blocking team"),
    ("Split Task", "Break large blocking task into smaller parts"),
    ("Change Priority", "Request priority override for blockers"),
];

const COMPONENTS: [&str; 5] = [
    "Interactive dependency graph with hover actions",
    "Color-coded task status (red=blocked, yellow=at-risk)",
    "Quick communication panels for each blocker",
    "Timeline view showing critical path impacts",
    "Suggested workaround generator with AI assistance",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    pub viewer: String,
    /// Matched as a substring of the project name.
    pub focus_project: String,
}

impl Default for DependencyRequest {
    fn default() -> Self {
        Self {
            viewer: "Mike Rodriguez (Engineering Lead)".to_string(),
            focus_project: "Mobile App 2.0".to_string(),
        }
    }
}

pub(crate) fn render(
    queries: &ReportQueries<'_>,
    request: &DependencyRequest,
    out: &mut impl Write,
) -> ReportResult<()> {
    writeln!(
        out,
        "\n🔍 === DEPENDENCY DETECTIVE for {} ===",
        request.viewer
    )?;
    writeln!(out, "VIEW: The Unblocker Interface")?;
    writeln!(
        out,
        "QUERY: 'What's blocking the {} release and help me unblock it'",
        request.focus_project
    )?;

    let Some(project) = queries.find_project(&request.focus_project)? else {
        writeln!(
            out,
            "❌ Project '{}' not found. Available projects:",
            request.focus_project
        )?;
        for name in queries.project_names()? {
            writeln!(out, "  • {name}")?;
        }
        return Ok(());
    };

    writeln!(out, "\n📱 PROJECT: {}", project.name)?;
    writeln!(
        out,
        "  Status: {} | Risk: {}/10",
        project.status, project.risk_score
    )?;
    writeln!(out, "  Target End: {}", project.target_end_date)?;

    let edges = queries.project_dependency_edges(project.id)?;
    writeln!(out, "\n🔗 BLOCKING DEPENDENCIES ({} found):", edges.len())?;
    if edges.is_empty() {
        writeln!(out, "  • No dependency blockers found!")?;
    }
    for edge in &edges {
        writeln!(out, "  • BLOCKER: {}", truncate(&edge.blocking_task, 50))?;
        writeln!(
            out,
            "    Status: {} | Owner: {} ({})",
            edge.blocking_status, edge.blocker_name, edge.blocker_email
        )?;
        writeln!(
            out,
            "    BLOCKS: {} (Owner: {})",
            truncate(&edge.blocked_task, 50),
            edge.blocked_name
        )?;
        writeln!(out, "    Type: {}", edge.dependency_type)?;
        writeln!(out)?;
    }

    let blocked = queries.project_blocked_tasks(project.id)?;
    writeln!(
        out,
        "\n🚧 BLOCKED TASKS IN PROJECT ({} found):",
        blocked.len()
    )?;
    if blocked.is_empty() {
        writeln!(out, "  • No blocked tasks in this project!")?;
    }
    for task in &blocked {
        writeln!(out, "  • {}", truncate(&task.title, 60))?;
        writeln!(
            out,
            "    Assigned: {} | Due: {}",
            task.assigned_to, task.due_date
        )?;
        if let Some(reason) = &task.blocker_reason {
            writeln!(out, "    Reason: {}", truncate(reason, 80))?;
        }
        writeln!(out)?;
    }

    write_actions(out, "🛠️", &ACTIONS)?;
    write_components(out, &COMPONENTS)?;
    Ok(())
}
