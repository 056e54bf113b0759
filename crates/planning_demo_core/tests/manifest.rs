use chrono::NaiveDate;
use planning_demo_core::db::{open_fresh_db, table_row_count, PLANNING_TABLES};
use planning_demo_core::{validate_scenarios, write_manifest, DemoGenerator, GeneratorConfig};

#[test]
fn manifest_records_counts_of_generated_tables() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("planning_demo.sqlite3");
    let manifest_path = dir.path().join("out").join("data_manifest.json");
    let reference_date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

    let mut conn = open_fresh_db(&db_path).unwrap();
    DemoGenerator::new(GeneratorConfig::with_reference_date(42, reference_date))
        .unwrap()
        .run(&mut conn)
        .unwrap();
    let report = validate_scenarios(&conn).unwrap();
    let manifest = write_manifest(&conn, &manifest_path, 42, reference_date, &report).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(value["seed"], 42);
    assert_eq!(value["reference_date"], "2026-03-02");
    assert_eq!(value["scenarios_validated"], true);
    assert_eq!(value["scenarios"]["overloaded_users"], 5);
    assert!(value["generated_at"].as_str().unwrap().contains('T'));

    for table in PLANNING_TABLES {
        let rows = table_row_count(&conn, table).unwrap();
        assert_eq!(value["counts"][table], rows, "table {table}");
        assert_eq!(manifest.counts[table], rows);
    }
    assert_eq!(value["counts"]["users"], 150);
}
