//! Nearest-neighbour lookups over a fixed reference point set
//! using an R-tree spatial index.

mod index;

pub use index::CoordinateIndex;
