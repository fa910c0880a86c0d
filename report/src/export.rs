//! Spreadsheet serialization and file delivery
//!
//! Serialization always completes in memory before anything touches disk.
//! [`write_export`] then writes a `.tmp` sibling and renames it, so a reader
//! never sees a half-written file under the final name.

use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::config::ExportFormat;
use crate::error::{ReportError, Result};
use crate::sheet::{Cell, Sheet};

/// A fully serialized export, ready to hand to the caller.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// Data rows, header excluded
    pub rows: usize,
}

/// Serialize `sheet` in the requested format.
pub fn serialize(sheet: &Sheet, format: ExportFormat, sheet_name: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Xlsx => to_xlsx(sheet, sheet_name)
            .map_err(|e| ReportError::serialization_with_source("failed to build workbook", e)),
        ExportFormat::Csv => to_csv(sheet),
    }
}

fn to_xlsx(sheet: &Sheet, sheet_name: &str) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, title) in (0u16..).zip(sheet.header()) {
            worksheet.write_string_with_format(0, col, *title, &bold)?;
        }

        for (row, cells) in (1u32..).zip(sheet.rows()) {
            for (col, cell) in (0u16..).zip(cells) {
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    // f64 holds every integer below 2^53 exactly
                    Cell::Number(n) => {
                        worksheet.write_number(row, col, *n as f64)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
    workbook.save_to_buffer()
}

fn to_csv(sheet: &Sheet) -> Result<Vec<u8>> {
    // RFC 4180 line endings; spreadsheet importers expect CRLF
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer
        .write_record(sheet.header())
        .map_err(|e| ReportError::serialization_with_source("failed to write csv header", e))?;

    for cells in sheet.rows() {
        writer
            .write_record(cells.iter().map(ToString::to_string))
            .map_err(|e| ReportError::serialization_with_source("failed to write csv row", e))?;
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::serialization_with_source("failed to flush csv", e.into_error()))
}

/// Deliver `document` into `dir` under its fixed filename.
///
/// Each call writes its own uniquely named temp file in `dir` and renames it
/// over the target, so concurrent exports never share a partial file and the
/// last completed one wins.
pub fn write_export(document: &ExportDocument, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        ReportError::io(format!("failed to create {}", dir.display()), e)
    })?;

    let path = dir.join(&document.filename);
    let mut tmp = tempfile::Builder::new()
        .prefix(".prodtrack-export-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            ReportError::io(format!("failed to create temp file in {}", dir.display()), e)
        })?;
    tmp.write_all(&document.bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| ReportError::io(format!("failed to write {}", tmp.path().display()), e))?;

    // On failure the temp file is removed when the returned handle drops
    tmp.persist(&path).map_err(|e| {
        ReportError::io(format!("failed to move export into {}", path.display()), e.error)
    })?;

    tracing::info!(
        path = %path.display(),
        content_type = document.content_type,
        bytes = document.bytes.len(),
        rows = document.rows,
        "Export written"
    );
    Ok(path)
}
