use crate::error::Result;
use crate::paths;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const BUSY_TIMEOUT_MS: i64 = 2000;

pub fn open(path: &Path) -> Result<Connection> {
    paths::ensure_parent_dir(path)?;
    let conn = Connection::open(path)?;
    apply_pragmas(&conn, true)?;
    restrict_db_permissions(path)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_pragmas(&conn, false)?;
    Ok(conn)
}

fn apply_pragmas(conn: &Connection, on_disk: bool) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    if on_disk {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_db_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_db_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
