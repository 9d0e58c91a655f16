//! Core data models for the imputation engine.

pub mod cell;
pub mod coordinate;
pub mod dataset;

pub use cell::Cell;
pub use coordinate::Coordinate;
pub(crate) use coordinate::CoordKey;
pub use dataset::{Dataset, Row, LATITUDE, LONGITUDE, TRACE_COLUMN};
