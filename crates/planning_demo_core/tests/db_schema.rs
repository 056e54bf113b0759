use planning_demo_core::db::migrations::latest_version;
use planning_demo_core::db::{
    open_db, open_db_in_memory, open_db_read_only, open_fresh_db, table_row_count, DbError,
    PLANNING_TABLES,
};
use rusqlite::Connection;

#[test]
fn in_memory_database_has_every_planning_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in PLANNING_TABLES {
        assert_eq!(table_row_count(&conn, table).unwrap(), 0, "table {table}");
    }
}

#[test]
fn row_count_rejects_unknown_table() {
    let conn = open_db_in_memory().unwrap();

    let err = table_row_count(&conn, "sqlite_master").unwrap_err();
    assert!(matches!(err, DbError::UnknownTable(name) if name == "sqlite_master"));
}

#[test]
fn fresh_open_discards_previous_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("planning.sqlite3");

    let conn = open_fresh_db(&path).unwrap();
    conn.execute(
        "INSERT INTO organizations (id, name, created_at) VALUES (1, 'Old', '2026-01-01 08:00:00');",
        [],
    )
    .unwrap();
    drop(conn);
    assert_eq!(
        table_row_count(&open_db(&path).unwrap(), "organizations").unwrap(),
        1
    );

    let conn = open_fresh_db(&path).unwrap();
    assert_eq!(table_row_count(&conn, "organizations").unwrap(), 0);
}

#[test]
fn read_only_open_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite3");

    match open_db_read_only(&path) {
        Err(DbError::NotFound(reported)) => assert_eq!(reported, path),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("missing file must not open"),
    }
}

#[test]
fn read_only_open_rejects_foreign_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER PRIMARY KEY);")
        .unwrap();
    drop(conn);

    match open_db_read_only(&path) {
        Err(DbError::SchemaMismatch {
            db_version,
            expected,
        }) => {
            assert_eq!(db_version, 0);
            assert_eq!(expected, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("foreign schema must not open"),
    }
}

#[test]
fn read_only_connection_cannot_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planning.sqlite3");
    drop(open_db(&path).unwrap());

    let conn = open_db_read_only(&path).unwrap();
    let result = conn.execute(
        "INSERT INTO organizations (id, name, created_at) VALUES (1, 'X', '2026-01-01 08:00:00');",
        [],
    );
    assert!(result.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
