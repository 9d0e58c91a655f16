//! Geographic coordinate type and its exact-equality hash key.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees.
///
/// Equality for co-location detection is exact value equality on the raw
/// floats; there is no tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Hashable key for grouping rows by exact coordinate.
pub(crate) type CoordKey = [OrderedFloat<f64>; 2];

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components are finite numbers (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub(crate) fn key(&self) -> CoordKey {
        [OrderedFloat(self.lat), OrderedFloat(self.lon)]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
