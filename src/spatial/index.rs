//! Spatial index for fast nearest-neighbour lookups over reference points.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::info;

use crate::models::Coordinate;

/// Wrapper for R-tree indexing of a reference coordinate.
///
/// Carries the point's insertion ordinal so that ties can be broken
/// deterministically. Duplicate coordinates stay as separate entries.
#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    position: [f64; 2],
    ordinal: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Nearest-neighbour index over a fixed set of coordinates using an R-tree.
///
/// Distance is planar Euclidean over the raw (lat, lon) degree values; this
/// is the documented approximation, not geodesic distance. The index is
/// immutable once built and is rebuilt per imputation call.
pub struct CoordinateIndex {
    tree: RTree<IndexedPoint>,
}

impl CoordinateIndex {
    /// Bulk-load the index from points in insertion order.
    ///
    /// Points with non-finite components are rejected by the caller before
    /// this; the ordinal of each entry is its position in `points`.
    pub fn build(points: &[Coordinate]) -> Self {
        info!("Building spatial index over {} reference points", points.len());

        let indexed: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(ordinal, c)| IndexedPoint {
                position: [c.lon, c.lat],
                ordinal,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Ordinal of the closest point to `query`.
    ///
    /// Tie-break contract: when two or more points sit at exactly the same
    /// squared distance, the one inserted earliest (lowest ordinal) wins.
    /// This keeps resolution reproducible across runs on identical input
    /// order; it is a policy choice, not a mathematical necessity.
    pub fn nearest(&self, query: &Coordinate) -> Option<usize> {
        let q = [query.lon, query.lat];
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&q);

        let (first, best_distance) = candidates.next()?;
        let mut best = first.ordinal;
        for (point, distance) in candidates {
            if distance > best_distance {
                break;
            }
            best = best.min(point.ordinal);
        }
        Some(best)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = CoordinateIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.nearest(&Coordinate::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_nearest_basic() {
        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(10.0, 10.0),
            Coordinate::new(-5.0, 3.0),
        ];
        let index = CoordinateIndex::build(&points);
        assert_eq!(index.len(), 3);

        assert_eq!(index.nearest(&Coordinate::new(0.1, -0.1)), Some(0));
        assert_eq!(index.nearest(&Coordinate::new(9.0, 9.0)), Some(1));
        assert_eq!(index.nearest(&Coordinate::new(-4.0, 3.0)), Some(2));
    }

    #[test]
    fn test_duplicates_not_collapsed() {
        let points = vec![
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 2.0),
        ];
        let index = CoordinateIndex::build(&points);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicate_resolves_to_earliest() {
        let points = vec![
            Coordinate::new(3.0, 4.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 1.0),
        ];
        let index = CoordinateIndex::build(&points);
        assert_eq!(index.nearest(&Coordinate::new(1.0, 1.0)), Some(1));
    }

    #[test]
    fn test_equal_distance_tie_breaks_to_earliest() {
        // Both points are exactly 1 degree from the query, on opposite sides.
        let points = vec![Coordinate::new(0.0, 1.0), Coordinate::new(0.0, -1.0)];
        let index = CoordinateIndex::build(&points);
        let query = Coordinate::new(0.0, 0.0);

        for _ in 0..10 {
            assert_eq!(index.nearest(&query), Some(0));
        }

        // Reversed insertion order flips the winner.
        let reversed = vec![Coordinate::new(0.0, -1.0), Coordinate::new(0.0, 1.0)];
        let index = CoordinateIndex::build(&reversed);
        assert_eq!(index.nearest(&query), Some(0));
    }

    #[test]
    fn test_exact_match_wins_over_near_miss() {
        let points = vec![Coordinate::new(0.0, 0.001), Coordinate::new(0.0, 0.0)];
        let index = CoordinateIndex::build(&points);
        assert_eq!(index.nearest(&Coordinate::new(0.0, 0.0)), Some(1));
    }
}
