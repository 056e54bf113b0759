//! Executive command center: portfolio KPIs, milestone health, critical
//! blockers.

use super::format::{thousands, title_case, truncate, write_actions, write_components};
use super::ReportResult;
use crate::repo::report_repo::ReportQueries;
use std::io::Write;

const CRITICAL_BLOCKER_LIMIT: u32 = 5;

const ACTIONS: [(&str, &str); 5] = [
    ("Escalate", "Send urgent message to project leads"),
    ("Reallocate", "Move resources between projects"),
    ("Emergency Meeting", "Schedule immediate stakeholder sync"),
    ("Risk Review", "Deep dive into high-risk projects"),
    ("Budget Override", "Approve additional resources"),
];

const COMPONENTS: [&str; 5] = [
    "KPI cards with trend arrows and click-to-drill capability",
    "Interactive risk heatmap by department/project",
    "One-click action buttons for each blocker",
    "Drag-and-drop resource allocation interface",
    "Real-time notification center for escalations",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutiveRequest {
    pub viewer: String,
}

impl Default for ExecutiveRequest {
    fn default() -> Self {
        Self {
            viewer: "Sarah Chen (CEO)".to_string(),
        }
    }
}

pub(crate) fn render(
    queries: &ReportQueries<'_>,
    request: &ExecutiveRequest,
    out: &mut impl Write,
) -> ReportResult<()> {
    writeln!(out, "\n🎯 === EXECUTIVE DASHBOARD for {} ===", request.viewer)?;
    writeln!(out, "VIEW: Executive Command Center")?;
    writeln!(
        out,
        "QUERY: 'Show me our Q1 status and let me fix what's broken'"
    )?;

    let kpis = queries.portfolio_kpis()?;
    let avg_risk = kpis
        .avg_risk_score
        .map(|score| format!("{score:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    writeln!(out, "\n📈 HIGH-LEVEL KPIs:")?;
    writeln!(
        out,
        "  • Total Projects: {} ({} active)",
        kpis.total_projects, kpis.active_projects
    )?;
    writeln!(
        out,
        "  • High Risk Projects: {} (avg risk: {avg_risk}/10)",
        kpis.high_risk_projects
    )?;
    writeln!(
        out,
        "  • Budget Utilization: {:.1}% (${}/${})",
        kpis.budget_utilization(),
        thousands(kpis.consumed_budget),
        thousands(kpis.total_budget)
    )?;

    writeln!(out, "\n🎯 MILESTONE HEALTH:")?;
    for row in queries.milestone_health()? {
        writeln!(
            out,
            "  • {} ({}): {} milestones ({:.1}%)",
            title_case(row.status.as_str()),
            row.health_status,
            row.count,
            row.percentage
        )?;
    }

    writeln!(out, "\n🚨 CRITICAL BLOCKERS:")?;
    let blockers = queries.critical_blockers(CRITICAL_BLOCKER_LIMIT)?;
    if blockers.is_empty() {
        writeln!(out, "  • No critical blockers found! 🎉")?;
    }
    for blocker in &blockers {
        writeln!(
            out,
            "  • {} (Project: {})",
            truncate(&blocker.title, 50),
            blocker.project_name
        )?;
        writeln!(out, "    Assigned to: {}", blocker.assigned_to)?;
        if let Some(reason) = &blocker.blocker_reason {
            writeln!(out, "    Blocker: {}", truncate(reason, 80))?;
        }
    }

    write_actions(out, "🎛️", &ACTIONS)?;
    write_components(out, &COMPONENTS)?;
    Ok(())
}
