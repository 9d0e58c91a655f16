//! Failure taxonomy for the imputation engine.

use thiserror::Error;

use crate::models::Coordinate;

/// Errors surfaced by [`crate::engine::Imputer`].
///
/// `Schema` and `InsufficientData` are validation failures raised before any
/// work is done. The remaining variants occur mid-resolution; because the
/// engine commits results only after every row resolves, all of them leave
/// the dataset untouched.
#[derive(Debug, Error)]
pub enum ImputeError {
    /// A required column (latitude, longitude, or the target) is absent.
    #[error("required column `{0}` is missing from the dataset")]
    Schema(String),

    /// No row has a known value in the target column, so there is nothing
    /// to impute from.
    #[error("column `{0}` has no known values to impute from")]
    InsufficientData(String),

    /// Several distinct values are co-located at one coordinate but the
    /// target is not numeric, so their mean is undefined.
    #[error(
        "column `{column}` holds {count} distinct non-numeric values at {coordinate}; \
         cannot resolve by averaging"
    )]
    Resolution {
        column: String,
        coordinate: Coordinate,
        count: usize,
    },

    /// The spatial index returned a coordinate the reference set does not
    /// know. This is a bug, not a data problem.
    #[error("spatial index returned unknown reference coordinate {coordinate}")]
    Internal { coordinate: Coordinate },

    /// The cooperative cancel flag was raised between rows.
    #[error("imputation cancelled")]
    Cancelled,
}
