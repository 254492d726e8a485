use goaltrack_core::db::migrations::latest_version;
use goaltrack_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "final_goals");
    assert_table_exists(&conn, "daily_goals");
    assert_table_exists(&conn, "daily_entries");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goaltrack.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "daily_entries");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn first_open_seeds_default_goals() {
    let conn = open_db_in_memory().unwrap();

    let final_ids = collect_ids(&conn, "SELECT id FROM final_goals ORDER BY id;");
    assert_eq!(final_ids, vec!["f1", "f2", "f3", "f4"]);

    let daily_ids = collect_ids(&conn, "SELECT id FROM daily_goals ORDER BY id;");
    assert_eq!(daily_ids, vec!["d1", "d2", "d3", "d4", "d5"]);
}

#[test]
fn reopening_does_not_duplicate_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goaltrack.db");

    let conn = open_db(&path).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(row_count(&conn, "final_goals"), 4);
    assert_eq!(row_count(&conn, "daily_goals"), 5);
}

#[test]
fn seeding_skips_stores_with_existing_goals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("goaltrack.db");

    let conn = open_db(&path).unwrap();
    conn.execute_batch(
        "DELETE FROM daily_goals;
         DELETE FROM final_goals;
         INSERT INTO final_goals (id, title, created_at) VALUES ('mine', 'my goal', 0);",
    )
    .unwrap();
    drop(conn);

    // A non-empty final_goals table means the user has data; defaults must
    // not come back.
    let conn = open_db(&path).unwrap();
    assert_eq!(row_count(&conn, "final_goals"), 1);
    assert_eq!(row_count(&conn, "daily_goals"), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn collect_ids(conn: &Connection, sql: &str) -> Vec<String> {
    let mut stmt = conn.prepare(sql).unwrap();
    let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
    rows.map(|row| row.unwrap()).collect()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
