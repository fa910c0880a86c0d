//! `prodtrack-report`: report listings and spreadsheet export.
//!
//! Pure projections over [`prodtrack_store::RecordStore`]: no aggregation,
//! no filtering beyond the stage listing, no computed fields.

pub mod config;
pub mod error;
pub mod export;
pub mod sheet;
pub mod view;

pub use config::{ExportConfig, ExportFormat};
pub use error::{ReportError, Result};
pub use export::{ExportDocument, write_export};
pub use sheet::{Cell, HEADER, Sheet};
pub use view::ReportingView;
