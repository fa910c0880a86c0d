//! `prodtrack-store`: append-only record store for production tracking.
//!
//! Two independent SQLite tables:
//! - `materiais`: raw material intake (material, color)
//! - `producao`: production events per order and stage
//!
//! Rows are never updated or deleted. Every insert is stamped by an injected
//! [`Clock`] as `YYYY-MM-DD HH:MM:SS` local time.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use prodtrack_store::{NewProductionEvent, RecordStore, StoreConfig, SystemClock};
//!
//! # fn main() -> prodtrack_store::Result<()> {
//! let store = RecordStore::open(&StoreConfig::at_path("database.db"), Arc::new(SystemClock))?;
//! store.insert_production_event(&NewProductionEvent::new("P001", "M1", "Red", 10, "CORTE"))?;
//! let cutting = store.list_production_events_by_stage("CORTE")?;
//! # Ok(())
//! # }
//! ```

pub mod async_wrapper;
pub mod clock;
pub mod config;
pub mod connection;
pub mod errors;
pub mod models;
mod schema;
pub mod store;

pub use clock::{Clock, FixedClock, SteppingClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::StoreConfig;
pub use errors::{ErrorCategory, Result, StoreError};
pub use models::{
    KNOWN_STAGES, MaterialIntake, NewProductionEvent, ProductionEvent, Quantity, ReportOrder,
    STAGE_CORTE, STAGE_COSTURA_ENTRADA, STAGE_COSTURA_SAIDA,
};
pub use store::RecordStore;
