//! Idempotent schema creation and shape verification

use rusqlite::{Connection, TransactionBehavior};

use crate::errors::{Result, StoreError};

/// Embedded schema SQL from SCHEMA.sql
const SCHEMA_SQL: &str = include_str!("../SCHEMA.sql");

/// Indexes are created after the column check so a foreign table shape
/// reports as a mismatch rather than an index failure.
const INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS idx_producao_etapa ON producao(etapa, id);";

/// Columns every table must carry. Extra columns are tolerated.
const EXPECTED_COLUMNS: [(&str, &[&str]); 2] = [
    ("materiais", &["id", "material", "cor", "data"]),
    (
        "producao",
        &["id", "pedido", "modelo", "cor", "quantidade", "etapa", "data"],
    ),
];

/// Create missing tables and indexes, then check the shape of what exists.
///
/// Runs inside an IMMEDIATE transaction, so concurrent callers serialize on
/// the write lock and never observe a half-applied schema.
pub(crate) fn apply_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| StoreError::unavailable_with_source("failed to begin schema transaction", e))?;

    tx.execute_batch(SCHEMA_SQL)
        .map_err(|e| StoreError::schema_with_source("failed to apply schema", e))?;

    verify_columns(&tx)?;

    tx.execute_batch(INDEX_SQL)
        .map_err(|e| StoreError::schema_with_source("failed to create indexes", e))?;

    tx.commit()
        .map_err(|e| StoreError::unavailable_with_source("failed to commit schema", e))?;
    Ok(())
}

fn verify_columns(conn: &Connection) -> Result<()> {
    for (table, expected) in EXPECTED_COLUMNS {
        let present = table_columns(conn, table)?;
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|col| !present.iter().any(|p| p == col))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::schema(format!(
                "table {table} is missing columns: {}",
                missing.join(", ")
            )));
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1)")
        .map_err(|e| StoreError::schema_with_source("failed to inspect schema", e))?;
    let rows = stmt
        .query_map([table], |row| row.get::<_, String>(0))
        .map_err(|e| StoreError::schema_with_source("failed to inspect schema", e))?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(
            row.map_err(|e| StoreError::schema_with_source("failed to read column name", e))?,
        );
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('materiais', 'producao')",
            [],
            |row| row.get(0),
        )
        .expect("count tables")
    }

    #[test]
    fn test_schema_is_idempotent() {
        let mut conn = Connection::open_in_memory().expect("open");
        apply_schema(&mut conn).expect("first apply");
        apply_schema(&mut conn).expect("second apply");
        assert_eq!(table_count(&conn), 2);
    }

    #[test]
    fn test_legacy_nullable_tables_are_accepted() {
        let mut conn = Connection::open_in_memory().expect("open");
        conn.execute_batch(
            "CREATE TABLE materiais (id INTEGER PRIMARY KEY AUTOINCREMENT, material TEXT, cor TEXT, data TEXT);
             CREATE TABLE producao (id INTEGER PRIMARY KEY AUTOINCREMENT, pedido TEXT, modelo TEXT,
                                    cor TEXT, quantidade INTEGER, etapa TEXT, data TEXT);",
        )
        .expect("legacy schema");
        apply_schema(&mut conn).expect("legacy tables match");
    }

    #[test]
    fn test_mismatched_table_is_schema_error() {
        let mut conn = Connection::open_in_memory().expect("open");
        conn.execute_batch("CREATE TABLE producao (id INTEGER PRIMARY KEY, pedido TEXT)")
            .expect("broken schema");
        let err = apply_schema(&mut conn).expect_err("mismatch");
        assert_eq!(err.category(), ErrorCategory::SchemaError);
        assert!(err.to_string().contains("quantidade"), "{err}");
    }
}
