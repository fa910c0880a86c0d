//! Export settings (`[export]` section of `prodtrack.toml`)

use serde::Deserialize;

/// File format of the exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Office Open XML workbook
    #[default]
    Xlsx,
    /// Comma-separated values, UTF-8
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,

    /// Fixed name of the delivered file
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Worksheet title (xlsx only)
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_filename() -> String {
    "relatorio.xlsx".to_string()
}

fn default_sheet_name() -> String {
    "Relatorio".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            filename: default_filename(),
            sheet_name: default_sheet_name(),
        }
    }
}

impl ExportConfig {
    /// Warn about settings that work but are probably unintended.
    pub fn validate(&self) {
        let expected = format!(".{}", self.format.extension());
        if !self.filename.to_ascii_lowercase().ends_with(&expected) {
            tracing::warn!(
                filename = %self.filename,
                format = self.format.extension(),
                "Export filename extension does not match export format"
            );
        }
    }
}
