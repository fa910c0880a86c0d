//! In-memory table behind every export format

use prodtrack_store::{ProductionEvent, Quantity};

/// Header row of the production export, in column order.
pub const HEADER: [&str; 6] = ["Pedido", "Modelo", "Cor", "Quantidade", "Etapa", "Data"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(i64),
    Empty,
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Empty => Ok(()),
        }
    }
}

pub type SheetRow = [Cell; 6];

/// One worksheet: the fixed [`HEADER`] followed by one row per event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    rows: Vec<SheetRow>,
}

impl Sheet {
    /// Build data rows as `pedido, modelo, cor, quantidade, etapa, data`,
    /// keeping the order of `events`.
    pub fn from_events(events: &[ProductionEvent]) -> Self {
        let rows = events
            .iter()
            .map(|e| {
                [
                    Cell::Text(e.order_ref.clone()),
                    Cell::Text(e.model.clone()),
                    Cell::Text(e.color.clone()),
                    quantity_cell(&e.quantity),
                    Cell::Text(e.stage.clone()),
                    Cell::Text(e.recorded_at.clone()),
                ]
            })
            .collect();
        Self { rows }
    }

    pub fn header(&self) -> &'static [&'static str; 6] {
        &HEADER
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Rows including the header.
    pub fn len_with_header(&self) -> usize {
        self.rows.len() + 1
    }
}

/// Counts stay numeric; legacy free-text quantities are written as text.
fn quantity_cell(quantity: &Quantity) -> Cell {
    match quantity {
        Quantity::Count(n) => Cell::Number(*n),
        Quantity::Text(text) => Cell::Text(text.clone()),
        Quantity::Missing => Cell::Empty,
    }
}
