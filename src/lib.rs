//! Juniper - spatial nearest-neighbour imputation for tabular geodata
//!
//! Fills missing values in a coordinate-bearing dataset by assigning each
//! missing row the value observed at its nearest fully-populated location.

pub mod engine;
pub mod error;
pub mod models;
pub mod reference;
pub mod report;
pub mod spatial;

pub use engine::Imputer;
pub use error::ImputeError;
pub use models::{Cell, Coordinate, Dataset, Row};
pub use report::Report;
