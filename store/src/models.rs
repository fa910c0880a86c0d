//! Row types for the `materiais` and `producao` tables

use serde::{Deserialize, Serialize};

/// Cutting.
pub const STAGE_CORTE: &str = "CORTE";
/// Sewing intake.
pub const STAGE_COSTURA_ENTRADA: &str = "COSTURA_ENTRADA";
/// Sewing output.
pub const STAGE_COSTURA_SAIDA: &str = "COSTURA_SAIDA";

/// Stage codes used by the fixed production screens, in workflow order.
///
/// The store does not enforce this list; any text is a valid stage.
pub const KNOWN_STAGES: [&str; 3] = [STAGE_CORTE, STAGE_COSTURA_ENTRADA, STAGE_COSTURA_SAIDA];

/// A row from the `materiais` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialIntake {
    pub id: i64,
    pub material: String,
    pub color: String,
    /// `YYYY-MM-DD HH:MM:SS`, set by the store at insert time
    pub recorded_at: String,
}

/// Quantity as read back from `producao.quantidade`.
///
/// New rows always hold a [`Quantity::Count`]. Databases written without
/// type checks may hold free text (`"10 un"`) or NULL; those rows are kept
/// and reported as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Count(i64),
    Text(String),
    Missing,
}

impl Quantity {
    /// The integer count, when the stored value is one.
    pub fn count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            Self::Text(_) | Self::Missing => None,
        }
    }
}

impl From<i64> for Quantity {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::Missing => Ok(()),
        }
    }
}

/// A row from the `producao` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionEvent {
    pub id: i64,
    pub order_ref: String,
    pub model: String,
    pub color: String,
    pub quantity: Quantity,
    pub stage: String,
    pub recorded_at: String,
}

/// Caller-supplied fields of a production event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductionEvent {
    pub order_ref: String,
    pub model: String,
    pub color: String,
    pub quantity: i64,
    /// Stored verbatim: no trimming, no case folding
    pub stage: String,
}

impl NewProductionEvent {
    pub fn new(
        order_ref: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
        quantity: i64,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            order_ref: order_ref.into(),
            model: model.into(),
            color: color.into(),
            quantity,
            stage: stage.into(),
        }
    }
}

/// Chronological direction of the full production listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportOrder {
    /// Oldest first
    #[serde(alias = "ascending")]
    Asc,
    /// Newest first
    #[default]
    #[serde(alias = "descending")]
    Desc,
}

impl ReportOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    /// SQL direction keyword
    pub(crate) fn sql_direction(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for ReportOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
