use chrono::NaiveDate;
use planning_demo_core::db::{open_db_in_memory, table_row_count, PLANNING_TABLES};
use planning_demo_core::{validate_scenarios, DemoGenerator, GeneratorConfig};
use rusqlite::types::Value;
use rusqlite::Connection;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn generate(seed: u64) -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    let generator =
        DemoGenerator::new(GeneratorConfig::with_reference_date(seed, reference_date())).unwrap();
    generator.run(&mut conn).unwrap();
    conn
}

fn scalar(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn dump_tables(conn: &Connection) -> Vec<String> {
    let mut lines = Vec::new();
    for table in PLANNING_TABLES {
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {table} ORDER BY rowid;"))
            .unwrap();
        let columns = stmt.column_count();
        let mut rows = stmt.query([]).unwrap();
        while let Some(row) = rows.next().unwrap() {
            let values: Vec<Value> = (0..columns).map(|i| row.get(i).unwrap()).collect();
            lines.push(format!("{table}: {values:?}"));
        }
    }
    lines
}

#[test]
fn row_counts_follow_configuration() {
    let config = GeneratorConfig::with_reference_date(42, reference_date());
    let conn = generate(42);

    assert_eq!(table_row_count(&conn, "organizations").unwrap(), 1);
    assert_eq!(
        table_row_count(&conn, "departments").unwrap(),
        config.departments.len() as i64
    );
    assert_eq!(
        table_row_count(&conn, "users").unwrap(),
        i64::from(config.role_total())
    );
    assert_eq!(table_row_count(&conn, "users").unwrap(), 150);
    assert_eq!(
        table_row_count(&conn, "projects").unwrap(),
        config.project_count as i64
    );
    assert_eq!(
        table_row_count(&conn, "resource_requests").unwrap(),
        i64::from(config.resource_request_count)
    );

    let team_total: usize = config.departments.iter().map(|d| d.team_count).sum();
    assert_eq!(table_row_count(&conn, "teams").unwrap(), team_total as i64);
    assert!(table_row_count(&conn, "tasks").unwrap() > 0);
}

#[test]
fn role_counts_match_distribution() {
    let config = GeneratorConfig::with_reference_date(42, reference_date());
    let conn = generate(42);

    for spec in &config.roles {
        let stored: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE role = ?1;",
                [spec.role.as_str()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(stored, i64::from(spec.count), "role {}", spec.role);
    }
}

#[test]
fn every_blocked_task_has_a_blocker_reason() {
    let conn = generate(42);

    assert!(scalar(&conn, "SELECT COUNT(*) FROM tasks WHERE status = 'blocked';") > 0);
    assert_eq!(
        scalar(
            &conn,
            "SELECT COUNT(*) FROM tasks t
             WHERE t.status = 'blocked'
               AND NOT EXISTS (
                   SELECT 1 FROM task_comments c
                   WHERE c.task_id = t.id AND c.is_blocker_reason = 1
               );",
        ),
        0
    );
}

#[test]
fn dependency_edges_reference_existing_distinct_tasks() {
    let conn = generate(42);

    assert!(table_row_count(&conn, "task_dependencies").unwrap() > 0);
    assert_eq!(
        scalar(
            &conn,
            "SELECT COUNT(*) FROM task_dependencies d
             WHERE d.task_id NOT IN (SELECT id FROM tasks)
                OR d.depends_on_task_id NOT IN (SELECT id FROM tasks);",
        ),
        0
    );
    assert_eq!(
        scalar(
            &conn,
            "SELECT COUNT(*) FROM task_dependencies WHERE task_id = depends_on_task_id;",
        ),
        0
    );
    assert_eq!(
        scalar(
            &conn,
            "SELECT COUNT(*) FROM (
                SELECT task_id, depends_on_task_id FROM task_dependencies
                GROUP BY task_id, depends_on_task_id HAVING COUNT(*) > 1
             );",
        ),
        0
    );
}

#[test]
fn compliance_flag_follows_task_title() {
    let conn = generate(42);

    assert_eq!(
        scalar(
            &conn,
            "SELECT COUNT(*) FROM tasks
             WHERE requires_compliance_check != (
                 title LIKE '%compliance%' OR title LIKE '%security%' OR title LIKE '%audit%'
             );",
        ),
        0
    );
}

#[test]
fn overload_patterns_produce_overloaded_users() {
    let conn = generate(42);
    let report = validate_scenarios(&conn).unwrap();

    assert_eq!(report.overloaded_users, 5);
    assert!(report.is_valid());
    assert!(report.blocking_dependencies > 0);
}

#[test]
fn timestamps_never_pass_the_reference_date() {
    let conn = generate(42);

    for (table, column) in [
        ("tasks", "created_at"),
        ("tasks", "completed_at"),
        ("task_comments", "created_at"),
        ("resource_requests", "created_at"),
        ("notifications", "created_at"),
    ] {
        let late = scalar(
            &conn,
            &format!("SELECT COUNT(*) FROM {table} WHERE {column} > '2026-03-02 23:59:59';"),
        );
        assert_eq!(late, 0, "{table}.{column}");
    }
}

#[test]
fn same_seed_regenerates_identical_rows() {
    let first = dump_tables(&generate(42));
    let second = dump_tables(&generate(42));
    assert_eq!(first, second);

    let other_seed = dump_tables(&generate(7));
    assert_ne!(first, other_seed);
}
