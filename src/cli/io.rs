//! CSV load/store for datasets.
//!
//! The two raw missing encodings (an empty/NaN value and the literal token
//! `"None"`) are unified into [`Cell::Missing`] here, at the ingestion
//! boundary, so the engine only ever sees one nullable representation.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer};
use tracing::info;

use juniper::models::{Cell, Dataset, Row};

/// Parse one raw CSV field into a cell.
pub fn parse_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "None" {
        return Cell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_nan() => Cell::Missing,
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(trimmed.to_string()),
    }
}

fn format_cell(cell: &Cell) -> String {
    cell.to_string()
}

/// Read a headed CSV file into a dataset.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file {}", path.display()))?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut dataset = Dataset::new(columns.clone());
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let mut row = Row::new();
        for (column, raw) in columns.iter().zip(record.iter()) {
            row.set(column, parse_cell(raw));
        }
        dataset.push_row(row);
    }

    info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

/// Write a dataset back out as headed CSV. Missing cells become empty
/// fields, coordinate cells render as `(lat, lon)`.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        let record: Vec<String> = dataset
            .columns()
            .iter()
            .map(|column| format_cell(row.get(column)))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}
