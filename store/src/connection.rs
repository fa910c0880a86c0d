//! Connection pooling and pragma configuration

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::errors::{Result, StoreError};

/// Initialize a connection pool for the database at `db_path`.
///
/// Every pooled connection runs in WAL mode with `synchronous = NORMAL` and
/// the given busy timeout, so concurrent writers queue instead of failing
/// immediately on a locked database.
pub fn initialize_pool(
    db_path: &Path,
    pool_size: u32,
    busy_timeout: Duration,
) -> Result<Pool<SqliteConnectionManager>> {
    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::unavailable_with_source(
                format!("failed to create db directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let manager = SqliteConnectionManager::file(db_path)
        .with_init(move |conn| apply_pragmas(conn, busy_timeout));

    Pool::builder()
        .max_size(pool_size)
        .build(manager)
        .map_err(|e| {
            StoreError::unavailable_with_source(
                format!("failed to open db at {}", db_path.display()),
                e,
            )
        })
}

fn apply_pragmas(conn: &mut Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    // busy_timeout first: switching to WAL needs a lock another connection may hold
    conn.busy_timeout(busy_timeout)?;
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        tracing::warn!(journal_mode = %mode, "SQLite refused WAL journal mode");
    }
    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_applies_pragmas() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = initialize_pool(
            &dir.path().join("nested").join("test.db"),
            2,
            Duration::from_millis(2500),
        )
        .expect("pool");
        assert_eq!(pool.max_size(), 2);

        let conn = pool.get().expect("connection");
        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .expect("journal_mode");
        assert_eq!(journal_mode, "wal");

        let busy_timeout: i64 = conn
            .query_row("PRAGMA busy_timeout", [], |row| row.get(0))
            .expect("busy_timeout");
        assert_eq!(busy_timeout, 2500);
    }
}
