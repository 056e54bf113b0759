//! Resource balancer: overloaded people, open workload, spare skills.

use super::format::{utilization_label, write_actions, write_components};
use super::ReportResult;
use crate::model::RowId;
use crate::repo::report_repo::{ReportQueries, UserWorkload};
use std::collections::HashMap;
use std::io::Write;

const WORKLOAD_TOP: usize = 10;
const WORK_WEEK_HOURS: f64 = 40.0;

const ACTIONS: [(&str, &str); 6] = [
    ("Drag & Drop", "Move tasks between team members"),
    ("Auto-Suggest", "AI-powered workload rebalancing"),
    ("Request Overtime", "Get approval for extra hours"),
    ("Find Contractor", "Search external resources"),
    ("Bulk Reschedule", "Move multiple deadlines"),
    ("Skill Match", "Find people with required skills"),
];

const COMPONENTS: [&str; 5] = [
    "Team capacity heat map with drag-and-drop tasks",
    "Skills matrix overlay for reallocation suggestions",
    "Real-time workload calculations as tasks move",
    "Integration with HR systems for contractor requests",
    "Bulk editing interface with undo/redo capabilities",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancerRequest {
    pub viewer: String,
}

impl Default for BalancerRequest {
    fn default() -> Self {
        Self {
            viewer: "Priya Patel (Resource Manager)".to_string(),
        }
    }
}

pub(crate) fn render(
    queries: &ReportQueries<'_>,
    request: &BalancerRequest,
    out: &mut impl Write,
) -> ReportResult<()> {
    writeln!(out, "\n⚖️ === RESOURCE BALANCER for {} ===", request.viewer)?;
    writeln!(out, "VIEW: The Load Balancer")?;
    writeln!(out, "QUERY: 'Who's overloaded next week and let me fix it'")?;

    let workloads = queries.open_workloads()?;
    let by_user: HashMap<RowId, &UserWorkload> = workloads
        .iter()
        .map(|workload| (workload.user_id, workload))
        .collect();

    let overloaded: Vec<_> = queries
        .user_allocations()?
        .into_iter()
        .filter(|allocation| allocation.is_overloaded())
        .collect();
    writeln!(out, "\n🔥 OVERLOADED USERS ({} found):", overloaded.len())?;
    if overloaded.is_empty() {
        writeln!(out, "  • No overloaded users found!")?;
    }
    for user in &overloaded {
        writeln!(out, "  • {} ({})", user.full_name, user.role)?;
        writeln!(
            out,
            "    Dept: {} | Allocation: {}%",
            user.department, user.total_allocation
        )?;
        writeln!(
            out,
            "    Available: {}h/week | Teams: {}",
            user.availability_hours_per_week, user.num_teams
        )?;
        if let Some(workload) = by_user.get(&user.user_id) {
            writeln!(
                out,
                "    Tasks: {} active ({:.1}h estimated)",
                workload.active_tasks, workload.total_estimated_hours
            )?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "\n⏰ WORKLOAD ANALYSIS (Top {WORKLOAD_TOP} by estimated hours):"
    )?;
    for workload in workloads.iter().take(WORKLOAD_TOP) {
        let utilization = workload.total_estimated_hours / WORK_WEEK_HOURS * 100.0;
        writeln!(
            out,
            "  • {}: {:.1}h ({:.0}%) {}",
            workload.full_name,
            workload.total_estimated_hours,
            utilization,
            utilization_label(utilization)
        )?;
        writeln!(
            out,
            "    Active: {} tasks | Pending: {:.1}h | In Progress: {:.1}h",
            workload.active_tasks, workload.pending_hours, workload.active_hours
        )?;
    }

    writeln!(out, "\n🎯 SKILLS AVAILABILITY for Rebalancing:")?;
    for skill in queries.skills_availability()? {
        writeln!(
            out,
            "  • {} ({}): {} people, avg {:.0}h/week",
            skill.specialization, skill.role, skill.people_count, skill.avg_availability
        )?;
    }

    write_actions(out, "🛠️", &ACTIONS)?;
    write_components(out, &COMPONENTS)?;
    Ok(())
}
