//! Nearest-neighbour imputation over a dataset's target column.
//!
//! Builds a reference view and a spatial index once per call, resolves every
//! missing row against its nearest reference, then commits all writes in one
//! pass. The commit only happens after every row has resolved, so a failing
//! call leaves the dataset exactly as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ImputeError;
use crate::models::{Cell, Coordinate, Dataset, LATITUDE, LONGITUDE, TRACE_COLUMN};
use crate::reference::ReferenceSet;
use crate::report::Report;
use crate::spatial::CoordinateIndex;

/// Imputes missing values in one target column from the values observed at
/// the nearest fully-populated coordinates.
///
/// Stateless across calls; each call rebuilds its reference snapshot, so an
/// imputed value never feeds the resolution of a later row and row order
/// cannot change the numeric outcome.
pub struct Imputer {
    target: String,
    keep_coordinate_trace: bool,
    cancel: Option<Arc<AtomicBool>>,
}

/// One pending write, produced during resolution and applied at commit.
struct Assignment {
    row: usize,
    value: Cell,
    matched: Coordinate,
}

impl Imputer {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            keep_coordinate_trace: false,
            cancel: None,
        }
    }

    /// Retain an `imputed_loc` column recording each row's effective
    /// coordinate: its own position, or for imputed rows the matched
    /// reference position.
    pub fn keep_coordinate_trace(mut self, keep: bool) -> Self {
        self.keep_coordinate_trace = keep;
        self
    }

    /// Cooperative cancellation: the flag is checked between rows, and a
    /// cancelled call leaves the dataset untouched.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn impute(&self, dataset: &mut Dataset) -> Result<Report, ImputeError> {
        self.impute_with_progress(dataset, |_, _| {})
    }

    /// Like [`Imputer::impute`], reporting `(done, total)` after each
    /// resolved row so callers can drive a progress bar.
    pub fn impute_with_progress(
        &self,
        dataset: &mut Dataset,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Report, ImputeError> {
        for column in [LATITUDE, LONGITUDE, self.target.as_str()] {
            if !dataset.has_column(column) {
                return Err(ImputeError::Schema(column.to_string()));
            }
        }

        let references = ReferenceSet::build(dataset, &self.target);
        if references.is_empty() {
            return Err(ImputeError::InsufficientData(self.target.clone()));
        }
        let index = CoordinateIndex::build(references.coordinates());

        // Fixed snapshot of rows to impute; its size is the report
        // denominator even if resolution later skips some of them.
        let pending: Vec<usize> = dataset
            .rows()
            .enumerate()
            .filter(|(_, row)| row.get(&self.target).is_missing())
            .map(|(i, _)| i)
            .collect();
        let attempted = pending.len();

        info!(
            "Imputing {} rows of `{}` from {} reference points",
            attempted,
            self.target,
            references.len()
        );

        let mut assignments: Vec<Assignment> = Vec::with_capacity(attempted);
        for (done, &row_index) in pending.iter().enumerate() {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(ImputeError::Cancelled);
                }
            }

            let Some(coordinate) = dataset.row(row_index).coordinate() else {
                debug!("Row {} has no usable coordinate; leaving it missing", row_index);
                progress(done + 1, attempted);
                continue;
            };

            let Some(ordinal) = index.nearest(&coordinate) else {
                // A non-empty reference set always yields a neighbour.
                return Err(ImputeError::Internal { coordinate });
            };
            let matched = references.coordinates()[ordinal];
            let Some(values) = references.values_at(&matched) else {
                return Err(ImputeError::Internal {
                    coordinate: matched,
                });
            };

            let value = self.resolve(values, matched)?;
            assignments.push(Assignment {
                row: row_index,
                value,
                matched,
            });
            progress(done + 1, attempted);
        }

        self.commit(dataset, assignments);

        let still_missing = dataset
            .rows()
            .filter(|row| row.get(&self.target).is_missing())
            .count();
        Ok(Report::summarize(attempted, still_missing))
    }

    /// Collapse the distinct values observed at one coordinate into a single
    /// cell: a lone value passes through, several values must all be numeric
    /// and resolve to their arithmetic mean.
    fn resolve(&self, values: &[Cell], matched: Coordinate) -> Result<Cell, ImputeError> {
        match values {
            [] => Err(ImputeError::Internal {
                coordinate: matched,
            }),
            [single] => Ok(single.clone()),
            several => {
                let mut sum = 0.0;
                for value in several {
                    match value.as_number() {
                        Some(n) => sum += n,
                        None => {
                            return Err(ImputeError::Resolution {
                                column: self.target.clone(),
                                coordinate: matched,
                                count: several.len(),
                            })
                        }
                    }
                }
                Ok(Cell::Number(sum / several.len() as f64))
            }
        }
    }

    /// Apply all resolved writes, then materialise the trace column if asked
    /// for: every row records its own coordinate, imputed rows the matched
    /// reference coordinate.
    fn commit(&self, dataset: &mut Dataset, assignments: Vec<Assignment>) {
        if self.keep_coordinate_trace {
            dataset.add_column(TRACE_COLUMN);
            for i in 0..dataset.len() {
                let trace = match dataset.row(i).coordinate() {
                    Some(own) => Cell::Coord(own),
                    None => Cell::Missing,
                };
                dataset.row_mut(i).set(TRACE_COLUMN, trace);
            }
        }

        for assignment in assignments {
            let row = dataset.row_mut(assignment.row);
            row.set(&self.target, assignment.value);
            if self.keep_coordinate_trace {
                row.set(TRACE_COLUMN, Cell::Coord(assignment.matched));
            }
        }
    }
}
