//! Plain-text tables for listings

use std::io::{self, Write};

use prodtrack_store::{MaterialIntake, ProductionEvent};

const MATERIAL_HEADER: [&str; 4] = ["ID", "Material", "Cor", "Data"];
const PRODUCTION_HEADER: [&str; 7] = [
    "ID",
    "Pedido",
    "Modelo",
    "Cor",
    "Quantidade",
    "Etapa",
    "Data",
];

pub fn materials(out: &mut dyn Write, rows: &[MaterialIntake]) -> io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.material.clone(),
                m.color.clone(),
                m.recorded_at.clone(),
            ]
        })
        .collect();
    table(out, &MATERIAL_HEADER, &cells)
}

pub fn production(out: &mut dyn Write, rows: &[ProductionEvent]) -> io::Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.order_ref.clone(),
                e.model.clone(),
                e.color.clone(),
                e.quantity.to_string(),
                e.stage.clone(),
                e.recorded_at.clone(),
            ]
        })
        .collect();
    table(out, &PRODUCTION_HEADER, &cells)
}

fn table(out: &mut dyn Write, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = header.iter().map(|h| (*h).to_string()).collect();
    line(out, &widths, &header)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(out, &widths, &rule)?;
    for row in rows {
        line(out, &widths, row)?;
    }
    Ok(())
}

fn line(out: &mut dyn Write, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let padded: Vec<String> = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}
