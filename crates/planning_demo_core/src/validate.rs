//! Post-generation checks that the demo scenarios actually exist.
//!
//! # Responsibility
//! - Count the scenario rows every persona relies on.
//! - Count integrity violations the generator must never produce.
//!
//! # Invariants
//! - A report is valid iff both integrity counts are zero; scenario counts
//!   are informational.

use crate::repo::RepoResult;
use log::{info, warn};
use rusqlite::Connection;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// Users whose team allocations sum above 100 percent.
    pub overloaded_users: i64,
    pub blocking_dependencies: i64,
    /// Risk score >= 8 with critical priority.
    pub high_risk_critical_projects: i64,
    pub blocked_soc2_tasks: i64,
    pub blocked_without_reason: i64,
    pub dangling_dependencies: i64,
}

impl ScenarioReport {
    pub fn is_valid(&self) -> bool {
        self.blocked_without_reason == 0 && self.dangling_dependencies == 0
    }

    /// Console summary printed after generation.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Validating demo scenarios...")?;
        writeln!(out, "  Found {} overloaded users", self.overloaded_users)?;
        writeln!(out, "  Found {} blocking dependencies", self.blocking_dependencies)?;
        writeln!(
            out,
            "  Found {} high-risk critical projects",
            self.high_risk_critical_projects
        )?;
        writeln!(
            out,
            "  Found {} blocked SOC2 compliance tasks",
            self.blocked_soc2_tasks
        )?;
        if self.is_valid() {
            writeln!(out, "  Integrity checks passed")?;
        } else {
            writeln!(
                out,
                "  Integrity checks FAILED: {} blocked tasks without reason, {} dangling dependencies",
                self.blocked_without_reason, self.dangling_dependencies
            )?;
        }
        Ok(())
    }
}

pub fn validate_scenarios(conn: &Connection) -> RepoResult<ScenarioReport> {
    let report = ScenarioReport {
        overloaded_users: count(
            conn,
            "SELECT COUNT(*) FROM (
                SELECT user_id
                FROM team_members
                GROUP BY user_id
                HAVING SUM(allocation_percentage) > 100
             );",
        )?,
        blocking_dependencies: count(
            conn,
            "SELECT COUNT(*) FROM task_dependencies WHERE dependency_type = 'blocks';",
        )?,
        high_risk_critical_projects: count(
            conn,
            "SELECT COUNT(*) FROM projects WHERE risk_score >= 8 AND priority = 'critical';",
        )?,
        blocked_soc2_tasks: count(
            conn,
            "SELECT COUNT(*)
             FROM tasks t
             JOIN task_tags tt ON t.id = tt.task_id
             WHERE tt.tag = 'soc2' AND t.status = 'blocked';",
        )?,
        blocked_without_reason: count(
            conn,
            "SELECT COUNT(*)
             FROM tasks t
             WHERE t.status = 'blocked'
               AND NOT EXISTS (
                   SELECT 1 FROM task_comments c
                   WHERE c.task_id = t.id AND c.is_blocker_reason = 1
               );",
        )?,
        dangling_dependencies: count(
            conn,
            "SELECT COUNT(*)
             FROM task_dependencies d
             LEFT JOIN tasks waiting ON d.task_id = waiting.id
             LEFT JOIN tasks blocker ON d.depends_on_task_id = blocker.id
             WHERE waiting.id IS NULL OR blocker.id IS NULL;",
        )?,
    };

    if report.is_valid() {
        info!(
            "event=validate module=validate status=ok overloaded_users={} blocking_dependencies={} high_risk_critical={} blocked_soc2={}",
            report.overloaded_users,
            report.blocking_dependencies,
            report.high_risk_critical_projects,
            report.blocked_soc2_tasks
        );
    } else {
        warn!(
            "event=validate module=validate status=error blocked_without_reason={} dangling_dependencies={}",
            report.blocked_without_reason, report.dangling_dependencies
        );
    }
    Ok(report)
}

fn count(conn: &Connection, sql: &str) -> RepoResult<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{validate_scenarios, ScenarioReport};
    use crate::db::open_db_in_memory;

    #[test]
    fn empty_database_is_valid_with_zero_scenarios() {
        let conn = open_db_in_memory().unwrap();
        let report = validate_scenarios(&conn).unwrap();
        assert_eq!(report, ScenarioReport::default());
        assert!(report.is_valid());
    }

    #[test]
    fn blocked_task_without_reason_fails_validation() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch(
            "INSERT INTO organizations VALUES (1, 'Org', '2026-01-01 08:00:00');
             INSERT INTO departments VALUES (1, 1, 'Eng', 'engineering');
             INSERT INTO users VALUES
                (1, 1, 1, 'a@x.io', 'A A', 'lead', 'backend', 40, 'PST', '2026-01-01 08:00:00');
             INSERT INTO projects VALUES
                (1, 1, 'P', 'Code', 'active', 'critical', '2025-10-01', '2026-06-01', NULL,
                 1000.0, 100.0, 9, 1, 0, '2025-10-01 09:00:00');
             INSERT INTO milestones VALUES (1, 1, 'M', '2026-02-01', 'in_progress', 10, 1, 'red');
             INSERT INTO tasks (
                id, milestone_id, title, status, priority, assigned_to, assigned_by,
                estimated_hours, start_date, due_date, task_type, created_at, updated_at
             ) VALUES (
                1, 1, 'Security audit for ledger', 'blocked', 'high', 1, 1,
                8.0, '2026-01-10', '2026-01-30', 'feature',
                '2026-01-10 09:00:00', '2026-01-10 09:00:00'
             );
             INSERT INTO task_tags VALUES (1, 'soc2');",
        )
        .unwrap();

        let report = validate_scenarios(&conn).unwrap();
        assert_eq!(report.high_risk_critical_projects, 1);
        assert_eq!(report.blocked_soc2_tasks, 1);
        assert_eq!(report.blocked_without_reason, 1);
        assert!(!report.is_valid());

        let mut rendered = Vec::new();
        report.render(&mut rendered).unwrap();
        let text = String::from_utf8(rendered).unwrap();
        assert!(text.contains("Integrity checks FAILED"));
    }
}
