//! Attribute cell values and the canonical missing-value definition.

use super::Coordinate;

/// One attribute value in a dataset row.
///
/// Input data encodes "missing" two ways (a null/NaN value and the literal
/// token `"None"`); both collapse into [`Cell::is_missing`] so downstream
/// logic only ever deals with a single definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    /// A coordinate value, used by the imputation trace column.
    Coord(Coordinate),
    Missing,
}

impl Cell {
    /// The one canonical missing test: an absent value, a NaN number, or the
    /// literal text `"None"`.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(t) => t == "None",
            Cell::Coord(_) => false,
        }
    }

    /// Numeric view of the cell, if it holds a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(t) => write!(f, "{}", t),
            Cell::Coord(c) => write!(f, "{}", c),
            Cell::Missing => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_unification() {
        assert!(Cell::Missing.is_missing());
        assert!(Cell::Number(f64::NAN).is_missing());
        assert!(Cell::Text("None".to_string()).is_missing());

        assert!(!Cell::Number(0.0).is_missing());
        assert!(!Cell::Text("none".to_string()).is_missing());
        assert!(!Cell::Text(String::new()).is_missing());
        assert!(!Cell::Coord(Coordinate::new(0.0, 0.0)).is_missing());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cell::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Text("2.5".to_string()).as_number(), None);
        assert_eq!(Cell::Missing.as_number(), None);
    }
}
