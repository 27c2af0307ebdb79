use utmkit_store::migrate::latest_version;
use utmkit_store::Store;

#[test]
fn migrations_apply_once() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store.migrate().expect("migrate again");

    let version: i64 = store
        .connection()
        .query_row("SELECT version FROM utmkit_schema LIMIT 1;", [], |row| {
            row.get(0)
        })
        .expect("schema version");
    assert_eq!(version, latest_version());
    assert_eq!(store.schema_version().expect("version"), 1);
}

#[test]
fn unmigrated_database_reports_version_zero() {
    let store = Store::open_in_memory().expect("open in memory");
    assert_eq!(store.schema_version().expect("version"), 0);
}

#[test]
fn newer_database_is_refused() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    store
        .connection()
        .execute("UPDATE utmkit_schema SET version = 99;", [])
        .expect("bump version");

    let err = store.migrate().expect_err("should refuse");
    assert!(err.to_string().contains("newer than available migrations"));
}

#[cfg(unix)]
#[test]
fn database_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("utmkit.sqlite3");
    let store = Store::open(&path).expect("open");
    store.migrate().expect("migrate");

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
