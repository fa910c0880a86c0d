//! Read-only projections over the record store

use std::path::{Path, PathBuf};
use std::sync::Arc;

use prodtrack_store::{ProductionEvent, RecordStore, ReportOrder};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::export::{ExportDocument, serialize, write_export};
use crate::sheet::Sheet;

/// Reporting view bound to one store, one chronological direction and one
/// export configuration.
#[derive(Debug, Clone)]
pub struct ReportingView {
    store: Arc<RecordStore>,
    order: ReportOrder,
    export: ExportConfig,
}

impl ReportingView {
    pub fn new(store: Arc<RecordStore>, order: ReportOrder, export: ExportConfig) -> Self {
        Self {
            store,
            order,
            export,
        }
    }

    /// Same view with a different chronological direction.
    pub fn with_order(mut self, order: ReportOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> ReportOrder {
        self.order
    }

    /// Every production event in the configured order, unchanged.
    pub fn build_report(&self) -> Result<Vec<ProductionEvent>> {
        Ok(self.store.list_all_production_events(self.order)?)
    }

    /// Events of one stage, newest first.
    pub fn stage_listing(&self, stage: &str) -> Result<Vec<ProductionEvent>> {
        Ok(self.store.list_production_events_by_stage(stage)?)
    }

    /// Header row plus one row per event of [`Self::build_report`].
    ///
    /// The query finishes before serialization starts, and the document is
    /// built entirely in memory.
    pub fn export_spreadsheet(&self) -> Result<ExportDocument> {
        let events = self.build_report()?;
        let sheet = Sheet::from_events(&events);
        let bytes = serialize(&sheet, self.export.format, &self.export.sheet_name)?;

        tracing::info!(
            rows = events.len(),
            order = %self.order,
            format = self.export.format.extension(),
            "Spreadsheet export built"
        );

        Ok(ExportDocument {
            filename: self.export.filename.clone(),
            content_type: self.export.format.content_type(),
            bytes,
            rows: events.len(),
        })
    }

    /// Build the export and deliver it into `dir`.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let document = self.export_spreadsheet()?;
        write_export(&document, dir)
    }
}
