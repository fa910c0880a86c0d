//! Append-only record store over the `materiais` and `producao` tables

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Value;
use rusqlite::{Row, params};

use crate::clock::{Clock, format_timestamp};
use crate::config::StoreConfig;
use crate::connection::initialize_pool;
use crate::errors::{Result, StoreError};
use crate::models::{MaterialIntake, NewProductionEvent, ProductionEvent, Quantity, ReportOrder};
use crate::schema::apply_schema;

const MATERIAL_COLUMNS: &str = "id, material, cor, data";
const PRODUCTION_COLUMNS: &str = "id, pedido, modelo, cor, quantidade, etapa, data";

/// Handle to the record store.
///
/// Built once at process start and shared (`Arc<RecordStore>`) with every
/// request-handling unit. Inserts and queries are refused until
/// [`RecordStore::initialize`] has completed at least once.
pub struct RecordStore {
    pool: Pool<SqliteConnectionManager>,
    clock: Arc<dyn Clock>,
    db_path: PathBuf,
    ready: AtomicBool,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("db_path", &self.db_path)
            .field("ready", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl RecordStore {
    /// Open the connection pool without touching the schema.
    pub fn connect(cfg: &StoreConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;
        let db_path = cfg.resolved_db_path();
        let pool = initialize_pool(
            &db_path,
            cfg.pool_size,
            Duration::from_millis(cfg.busy_timeout_ms),
        )?;

        tracing::debug!(path = %db_path.display(), pool_size = cfg.pool_size, "Record store connected");

        Ok(Self {
            pool,
            clock,
            db_path,
            ready: AtomicBool::new(false),
        })
    }

    /// Connect and initialize in one step.
    pub fn open(cfg: &StoreConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = Self::connect(cfg, clock)?;
        store.initialize()?;
        Ok(store)
    }

    /// Database file backing this store
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Create both tables if absent. Safe to repeat and to race with itself.
    pub fn initialize(&self) -> Result<()> {
        let mut conn = self.checkout()?;
        apply_schema(&mut conn)?;
        self.ready.store(true, Ordering::Release);

        tracing::info!(path = %self.db_path.display(), "Record store schema ready");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // materiais
    // ─────────────────────────────────────────────────────────────────────────────

    /// Append a material intake stamped with the current clock time.
    pub fn insert_material_intake(&self, material: &str, color: &str) -> Result<i64> {
        let conn = self.ready_connection()?;
        let recorded_at = format_timestamp(self.clock.now());

        let id: i64 = conn
            .query_row(
                "INSERT INTO materiais (material, cor, data) VALUES (?1, ?2, ?3) RETURNING id",
                params![material, color, recorded_at],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::unavailable_with_source("failed to insert material", e))?;

        tracing::debug!(id, material, color, recorded_at = %recorded_at, "Inserted material intake");
        Ok(id)
    }

    /// All material intakes, newest id first.
    pub fn list_material_intakes(&self) -> Result<Vec<MaterialIntake>> {
        let conn = self.ready_connection()?;
        let sql = format!("SELECT {MATERIAL_COLUMNS} FROM materiais ORDER BY id DESC");
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| StoreError::unavailable_with_source("failed to query materials", e))?;
        let rows = stmt
            .query_map([], material_from_row)
            .map_err(|e| StoreError::unavailable_with_source("failed to query materials", e))?;

        let mut materials = Vec::new();
        for row in rows {
            materials.push(
                row.map_err(|e| StoreError::unavailable_with_source("failed to read material", e))?,
            );
        }
        Ok(materials)
    }

    pub fn count_material_intakes(&self) -> Result<i64> {
        let conn = self.ready_connection()?;
        conn.query_row("SELECT COUNT(*) FROM materiais", [], |row| row.get(0))
            .map_err(|e| StoreError::unavailable_with_source("failed to count materials", e))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // producao
    // ─────────────────────────────────────────────────────────────────────────────

    /// Append a production event stamped with the current clock time.
    ///
    /// `stage` is stored exactly as given.
    pub fn insert_production_event(&self, event: &NewProductionEvent) -> Result<i64> {
        let conn = self.ready_connection()?;
        let recorded_at = format_timestamp(self.clock.now());

        let id: i64 = conn
            .query_row(
                r#"
                INSERT INTO producao (pedido, modelo, cor, quantidade, etapa, data)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                RETURNING id
                "#,
                params![
                    event.order_ref,
                    event.model,
                    event.color,
                    event.quantity,
                    event.stage,
                    recorded_at
                ],
                |row| row.get(0),
            )
            .map_err(|e| {
                StoreError::unavailable_with_source("failed to insert production event", e)
            })?;

        tracing::debug!(
            id,
            order_ref = %event.order_ref,
            stage = %event.stage,
            quantity = event.quantity,
            "Inserted production event"
        );
        Ok(id)
    }

    /// Events whose stage equals `stage` byte for byte, newest id first.
    ///
    /// An unknown stage yields an empty list.
    pub fn list_production_events_by_stage(&self, stage: &str) -> Result<Vec<ProductionEvent>> {
        let sql = format!(
            "SELECT {PRODUCTION_COLUMNS} FROM producao WHERE etapa = ?1 ORDER BY id DESC"
        );
        self.query_production(&sql, [stage])
    }

    /// Every production event ordered by `data`, ties broken by id in the
    /// same direction.
    pub fn list_all_production_events(&self, order: ReportOrder) -> Result<Vec<ProductionEvent>> {
        let dir = order.sql_direction();
        let sql =
            format!("SELECT {PRODUCTION_COLUMNS} FROM producao ORDER BY data {dir}, id {dir}");
        self.query_production(&sql, [])
    }

    pub fn count_production_events(&self) -> Result<i64> {
        let conn = self.ready_connection()?;
        conn.query_row("SELECT COUNT(*) FROM producao", [], |row| row.get(0))
            .map_err(|e| StoreError::unavailable_with_source("failed to count production events", e))
    }

    fn query_production<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<ProductionEvent>> {
        let conn = self.ready_connection()?;
        let mut stmt = conn.prepare(sql).map_err(|e| {
            StoreError::unavailable_with_source("failed to query production events", e)
        })?;
        let rows = stmt.query_map(params, production_from_row).map_err(|e| {
            StoreError::unavailable_with_source("failed to query production events", e)
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row.map_err(|e| {
                StoreError::unavailable_with_source("failed to read production event", e)
            })?);
        }

        tracing::debug!(rows = events.len(), "Queried production events");
        Ok(events)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // connections
    // ─────────────────────────────────────────────────────────────────────────────

    fn checkout(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| StoreError::unavailable_with_source("failed to get connection", e))
    }

    fn ready_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        if !self.is_initialized() {
            return Err(StoreError::NotInitialized);
        }
        self.checkout()
    }
}

fn material_from_row(row: &Row<'_>) -> rusqlite::Result<MaterialIntake> {
    Ok(MaterialIntake {
        id: row.get(0)?,
        material: text_or_empty(row, 1)?,
        color: text_or_empty(row, 2)?,
        recorded_at: text_or_empty(row, 3)?,
    })
}

fn production_from_row(row: &Row<'_>) -> rusqlite::Result<ProductionEvent> {
    Ok(ProductionEvent {
        id: row.get(0)?,
        order_ref: text_or_empty(row, 1)?,
        model: text_or_empty(row, 2)?,
        color: text_or_empty(row, 3)?,
        quantity: quantity_from_value(row.get(4)?),
        stage: text_or_empty(row, 5)?,
        recorded_at: text_or_empty(row, 6)?,
    })
}

/// Tables created without NOT NULL constraints may hold NULL text.
fn text_or_empty(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

/// Legacy databases may hold the quantity as free text or NULL; integral
/// forms become a count, anything else is kept as written.
fn quantity_from_value(value: Value) -> Quantity {
    match value {
        Value::Integer(n) => Quantity::Count(n),
        Value::Real(f) if f.fract() == 0.0 => Quantity::Count(f as i64),
        Value::Real(f) => Quantity::Text(f.to_string()),
        Value::Text(text) => match text.trim().parse::<i64>() {
            Ok(n) => Quantity::Count(n),
            Err(_) => Quantity::Text(text),
        },
        Value::Blob(bytes) => Quantity::Text(String::from_utf8_lossy(&bytes).into_owned()),
        Value::Null => Quantity::Missing,
    }
}
