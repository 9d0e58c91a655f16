//! Reference view of a dataset: rows whose target value is already known.

use hashbrown::HashMap;
use tracing::debug;

use crate::models::{Cell, CoordKey, Coordinate, Dataset};

/// The subset of a dataset usable as imputation references, grouped by exact
/// coordinate.
///
/// `coordinates` keeps one entry per reference row in dataset order, with
/// co-located duplicates preserved; it is the insertion order the spatial
/// index is built from, so its ordinals govern tie-breaking. `values` holds
/// the distinct non-missing target values observed at each exact coordinate
/// and never contains an empty set.
pub struct ReferenceSet {
    coordinates: Vec<Coordinate>,
    values: HashMap<CoordKey, Vec<Cell>>,
}

impl ReferenceSet {
    /// Select rows with a known target value and a resolvable coordinate.
    ///
    /// Rows without finite latitude/longitude cannot be indexed and are
    /// dropped from the reference view.
    pub fn build(dataset: &Dataset, target: &str) -> Self {
        let mut coordinates = Vec::new();
        let mut values: HashMap<CoordKey, Vec<Cell>> = HashMap::new();

        for (i, row) in dataset.rows().enumerate() {
            let cell = row.get(target);
            if cell.is_missing() {
                continue;
            }
            let Some(coordinate) = row.coordinate() else {
                debug!("Row {} has a known value but no usable coordinate; skipping", i);
                continue;
            };

            coordinates.push(coordinate);
            let observed = values.entry(coordinate.key()).or_default();
            if !observed.contains(cell) {
                observed.push(cell.clone());
            }
        }

        Self {
            coordinates,
            values,
        }
    }

    /// Reference coordinates in dataset order, duplicates included.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Distinct known values recorded at an exact coordinate.
    ///
    /// Only coordinates taken from [`ReferenceSet::coordinates`] are valid
    /// queries; anything else returns `None`.
    pub fn values_at(&self, coordinate: &Coordinate) -> Option<&[Cell]> {
        self.values.get(&coordinate.key()).map(|v| v.as_slice())
    }

    /// Number of reference rows (not distinct coordinates).
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Row, LATITUDE, LONGITUDE};

    fn row(lat: f64, lon: f64, value: Cell) -> Row {
        Row::new()
            .with(LATITUDE, Cell::Number(lat))
            .with(LONGITUDE, Cell::Number(lon))
            .with("elevation", value)
    }

    fn dataset(rows: Vec<Row>) -> Dataset {
        let mut ds = Dataset::new(vec![
            LATITUDE.to_string(),
            LONGITUDE.to_string(),
            "elevation".to_string(),
        ]);
        for r in rows {
            ds.push_row(r);
        }
        ds
    }

    #[test]
    fn test_missing_rows_excluded() {
        let ds = dataset(vec![
            row(0.0, 0.0, Cell::Number(5.0)),
            row(1.0, 1.0, Cell::Missing),
            row(2.0, 2.0, Cell::Text("None".to_string())),
            row(3.0, 3.0, Cell::Number(f64::NAN)),
        ]);
        let refs = ReferenceSet::build(&ds, "elevation");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.coordinates(), &[Coordinate::new(0.0, 0.0)]);
    }

    #[test]
    fn test_colocated_rows_kept_as_duplicates() {
        let ds = dataset(vec![
            row(0.0, 0.0, Cell::Number(4.0)),
            row(0.0, 0.0, Cell::Number(6.0)),
            row(0.0, 0.0, Cell::Number(4.0)),
        ]);
        let refs = ReferenceSet::build(&ds, "elevation");
        // Three reference rows, one coordinate, two distinct values.
        assert_eq!(refs.len(), 3);
        let values = refs.values_at(&Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(values, &[Cell::Number(4.0), Cell::Number(6.0)]);
    }

    #[test]
    fn test_unlocatable_reference_dropped() {
        let mut bad = Row::new().with("elevation", Cell::Number(9.0));
        bad.set(LATITUDE, Cell::Missing);
        bad.set(LONGITUDE, Cell::Number(1.0));

        let ds = dataset(vec![bad, row(2.0, 2.0, Cell::Number(7.0))]);
        let refs = ReferenceSet::build(&ds, "elevation");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.coordinates(), &[Coordinate::new(2.0, 2.0)]);
    }

    #[test]
    fn test_values_at_unknown_coordinate() {
        let ds = dataset(vec![row(0.0, 0.0, Cell::Number(5.0))]);
        let refs = ReferenceSet::build(&ds, "elevation");
        assert!(refs.values_at(&Coordinate::new(9.0, 9.0)).is_none());
    }

    #[test]
    fn test_empty_when_no_known_values() {
        let ds = dataset(vec![row(0.0, 0.0, Cell::Missing)]);
        let refs = ReferenceSet::build(&ds, "elevation");
        assert!(refs.is_empty());
    }
}
