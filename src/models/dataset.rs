//! In-memory tabular dataset with named columns and stable row indices.

use hashbrown::HashMap;

use super::{Cell, Coordinate};

/// Name of the column holding latitude in decimal degrees.
pub const LATITUDE: &str = "latitude";
/// Name of the column holding longitude in decimal degrees.
pub const LONGITUDE: &str = "longitude";
/// Name of the coordinate-trace column added by imputation when requested.
pub const TRACE_COLUMN: &str = "imputed_loc";

/// One record of named attribute cells.
///
/// A column absent from the row reads as [`Cell::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&Cell::Missing)
    }

    pub fn set(&mut self, column: impl Into<String>, cell: Cell) {
        self.cells.insert(column.into(), cell);
    }

    /// Builder-style variant of [`Row::set`], for terse construction.
    pub fn with(mut self, column: impl Into<String>, cell: Cell) -> Self {
        self.set(column, cell);
        self
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).as_number()
    }

    /// The row's position, when both coordinate columns hold finite numbers.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.number(LATITUDE)?;
        let lon = self.number(LONGITUDE)?;
        Some(Coordinate::new(lat, lon))
    }
}

/// Ordered sequence of rows with a shared column list.
///
/// Rows are addressed by stable index and mutated in place; the dataset is
/// owned by the caller for the duration of any operation on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Register a column name; a no-op if it already exists. Existing rows
    /// read as missing in the new column until written.
    pub fn add_column(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_column(&name) {
            self.columns.push(name);
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut Row {
        &mut self.rows[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
