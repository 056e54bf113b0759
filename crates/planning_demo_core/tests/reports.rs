use chrono::NaiveDate;
use planning_demo_core::db::{open_db_in_memory, open_fresh_db};
use planning_demo_core::report::{
    BalancerRequest, CoordinatorRequest, DependencyRequest, ExecutiveRequest, PersonalRequest,
};
use planning_demo_core::{DemoGenerator, GeneratorConfig, PlanningAnalyzer, ReportError};
use std::path::Path;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn generate_into(path: &Path) {
    let mut conn = open_fresh_db(path).unwrap();
    DemoGenerator::new(GeneratorConfig::with_reference_date(42, reference_date()))
        .unwrap()
        .run(&mut conn)
        .unwrap();
}

fn analyzer() -> (tempfile::TempDir, PlanningAnalyzer) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning_demo.sqlite3");
    generate_into(&path);
    let analyzer = PlanningAnalyzer::open(&path, reference_date()).unwrap();
    (dir, analyzer)
}

fn rendered(render: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut out = Vec::new();
    render(&mut out);
    String::from_utf8(out).unwrap()
}

#[test]
fn missing_database_is_reported_distinctly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_generated.sqlite3");

    match PlanningAnalyzer::open(&path, reference_date()) {
        Err(ReportError::DatabaseNotFound(reported)) => assert_eq!(reported, path),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("missing database must not open"),
    }
}

#[test]
fn executive_dashboard_prints_portfolio_kpis() {
    let (_dir, analyzer) = analyzer();
    let text = rendered(|out| {
        analyzer
            .executive_dashboard(out, &ExecutiveRequest::default())
            .unwrap()
    });

    assert!(text.contains("=== EXECUTIVE DASHBOARD for Sarah Chen (CEO) ==="));
    assert!(text.contains("Total Projects: 25 ("));
    assert!(text.contains("Budget Utilization: "));
    assert!(text.contains("MILESTONE HEALTH:"));
    assert!(text.contains(" milestones ("));
    assert!(text.contains("[Budget Override] - Approve additional resources"));
}

#[test]
fn dependency_detective_focuses_on_named_project() {
    let (_dir, analyzer) = analyzer();
    let text = rendered(|out| {
        analyzer
            .dependency_detective(out, &DependencyRequest::default())
            .unwrap()
    });

    assert!(text.contains("📱 PROJECT: Mobile App 2.0"));
    assert!(text.contains(" | Risk: "));
    assert!(text.contains("BLOCKING DEPENDENCIES ("));
    assert!(text.contains("BLOCKED TASKS IN PROJECT ("));
}

#[test]
fn dependency_detective_lists_projects_when_focus_is_unknown() {
    let (_dir, analyzer) = analyzer();
    let request = DependencyRequest {
        focus_project: "Nonexistent Initiative".to_string(),
        ..DependencyRequest::default()
    };
    let text = rendered(|out| analyzer.dependency_detective(out, &request).unwrap());

    assert!(text.contains("❌ Project 'Nonexistent Initiative' not found. Available projects:"));
    assert!(text.contains("  • Mobile App 2.0"));
    assert!(text.contains("  • Customer Portal"));
}

#[test]
fn resource_balancer_lists_every_overloaded_user() {
    let (_dir, analyzer) = analyzer();
    let expected = analyzer
        .queries()
        .user_allocations()
        .unwrap()
        .into_iter()
        .filter(|allocation| allocation.is_overloaded())
        .count();
    assert!(expected >= 5);

    let text = rendered(|out| {
        analyzer
            .resource_balancer(out, &BalancerRequest::default())
            .unwrap()
    });
    assert!(text.contains(&format!("OVERLOADED USERS ({expected} found)")));
    assert!(text.contains("WORKLOAD ANALYSIS (Top 10 by estimated hours)"));
    assert!(text.contains("SKILLS AVAILABILITY for Rebalancing"));
}

#[test]
fn personal_assistant_resolves_default_and_explicit_users() {
    let (_dir, analyzer) = analyzer();

    let default_view = rendered(|out| {
        analyzer
            .personal_assistant(out, &PersonalRequest::default())
            .unwrap()
    });
    assert!(default_view.contains("📱 USER: "));
    assert!(default_view.contains("TODAY'S FOCUS ("));
    assert!(default_view.contains("RECENT ACTIVITY (last 7 days)"));

    let missing = PersonalRequest {
        user_id: Some(9_999),
        ..PersonalRequest::default()
    };
    let missing_view = rendered(|out| analyzer.personal_assistant(out, &missing).unwrap());
    assert!(missing_view.contains("❌ User 9999 not found"));
}

/// One senior developer with eight work logs: seven inside the window
/// (including one exactly seven days back) and one a day older.
fn work_log_analyzer() -> PlanningAnalyzer {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO organizations (id, name, created_at) VALUES (1, 'Org', '2026-01-01 08:00:00');
         INSERT INTO departments (id, organization_id, name, type) VALUES (1, 1, 'Eng', 'engineering');
         INSERT INTO users (
            id, organization_id, department_id, email, full_name, role,
            specialization, availability_hours_per_week, timezone, created_at
         ) VALUES (1, 1, 1, 'dana.park@example.com', 'Dana Park', 'senior', 'backend', 40, 'PST',
                   '2026-01-01 08:00:00');
         INSERT INTO projects (
            id, organization_id, name, code_name, status, priority, start_date, target_end_date,
            budget_allocated, budget_consumed, risk_score, created_at
         ) VALUES (1, 1, 'Billing Revamp', 'AURORA', 'active', 'high', '2026-01-05', '2026-06-30',
                   100000.0, 25000.0, 4, '2026-01-05 09:00:00');
         INSERT INTO milestones (id, project_id, name, due_date, status, health_status)
         VALUES (1, 1, 'Alpha', '2026-03-20', 'in_progress', 'green');
         INSERT INTO tasks (
            id, milestone_id, title, status, priority, assigned_to, assigned_by,
            estimated_hours, start_date, due_date, task_type, created_at, updated_at
         ) VALUES (1, 1, 'Ship invoice export', 'completed', 'medium', 1, 1, 20.0,
                   '2026-02-01', '2026-03-01', 'feature', '2026-02-01 09:00:00',
                   '2026-03-02 17:00:00');
         INSERT INTO work_logs (id, task_id, user_id, hours_logged, log_date, created_at) VALUES
            (1, 1, 1, 2.0, '2026-03-02', '2026-03-02 18:00:00'),
            (2, 1, 1, 2.0, '2026-03-01', '2026-03-01 18:00:00'),
            (3, 1, 1, 2.0, '2026-02-28', '2026-02-28 18:00:00'),
            (4, 1, 1, 2.0, '2026-02-27', '2026-02-27 18:00:00'),
            (5, 1, 1, 2.0, '2026-02-26', '2026-02-26 18:00:00'),
            (6, 1, 1, 2.0, '2026-02-25', '2026-02-25 18:00:00'),
            (7, 1, 1, 3.5, '2026-02-23', '2026-02-23 18:00:00'),
            (8, 1, 1, 10.0, '2026-02-22', '2026-02-22 18:00:00');",
    )
    .unwrap();
    PlanningAnalyzer::from_connection(conn, reference_date())
}

#[test]
fn personal_assistant_totals_every_log_in_the_seven_day_window() {
    let analyzer = work_log_analyzer();
    let queries = analyzer.queries();

    assert_eq!(queries.recent_work_logs(1, reference_date()).unwrap().len(), 5);
    assert_eq!(queries.recent_hours_logged(1, reference_date()).unwrap(), 15.5);
    assert_eq!(queries.recent_hours_logged(2, reference_date()).unwrap(), 0.0);

    let text = rendered(|out| {
        analyzer
            .personal_assistant(out, &PersonalRequest::default())
            .unwrap()
    });
    assert!(text.contains("📱 USER: Dana Park (senior, backend)"));
    assert!(text.contains("Total logged: 15.5 hours in the last 7 days"));
    assert!(text.contains("2026-03-02: 2.0h on Ship invoice export"));
    assert!(!text.contains("2026-02-22"));
}

#[test]
fn coordinator_shows_department_swimlanes() {
    let (_dir, analyzer) = analyzer();
    let text = rendered(|out| {
        analyzer
            .cross_functional_coordinator(out, &CoordinatorRequest::default())
            .unwrap()
    });

    assert!(text.contains("🚀 PROJECT: Customer Portal"));
    assert!(text.contains("TEAM PROGRESS SWIMLANES:"));
    assert!(text.contains(" done, "));
    assert!(text.contains("CROSS-TEAM HANDOFFS ("));
}

#[test]
fn run_all_demos_renders_every_persona_in_order() {
    let (_dir, analyzer) = analyzer();
    let text = rendered(|out| analyzer.run_all_demos(out).unwrap());

    let headers = [
        "=== EXECUTIVE DASHBOARD",
        "=== DEPENDENCY DETECTIVE",
        "=== RESOURCE BALANCER",
        "=== PERSONAL ASSISTANT",
        "=== CROSS-FUNCTIONAL COORDINATOR",
        "DEMO COMPLETE!",
    ];
    let positions: Vec<usize> = headers
        .iter()
        .map(|header| text.find(header).unwrap_or_else(|| panic!("missing {header}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn reports_are_stable_for_the_same_database() {
    let (_dir, analyzer) = analyzer();
    let first = rendered(|out| analyzer.run_all_demos(out).unwrap());
    let second = rendered(|out| analyzer.run_all_demos(out).unwrap());
    assert_eq!(first, second);
}
