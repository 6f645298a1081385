//! Point markers placed on the pit graph.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Unique identifier for a point.
pub type PointId = Uuid;

/// Radius of a rendered point marker.
pub const POINT_RADIUS: f64 = 16.0;

/// Half-width/half-height of the touch window around a point.
/// Twice the marker radius so points are easy to grab.
pub const HIT_HALF_EXTENT: f64 = 32.0;

/// A draggable point on the graph, in view-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitPoint {
    pub(crate) id: PointId,
    /// Current position.
    pub position: Point,
}

impl PitPoint {
    /// Create a new point at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self::at(Point::new(x, y))
    }

    /// Create a new point at a position.
    pub fn at(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
        }
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Move the point to a new position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Check whether `query` lies strictly inside this point's touch window.
    pub fn hit_test(&self, query: Point, half_extent: f64) -> bool {
        (self.position.x - query.x).abs() < half_extent
            && (self.position.y - query.y).abs() < half_extent
    }
}

/// Ordering function used to keep a [`crate::PointStore`] sorted.
pub type PointOrdering = fn(&PitPoint, &PitPoint) -> Ordering;

/// Order points by ascending x-coordinate.
pub fn compare_by_x(a: &PitPoint, b: &PitPoint) -> Ordering {
    a.position.x.total_cmp(&b.position.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_points_have_distinct_ids() {
        let a = PitPoint::new(1.0, 2.0);
        let b = PitPoint::new(1.0, 2.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_hit_test_is_strict() {
        let point = PitPoint::new(100.0, 100.0);
        assert!(point.hit_test(Point::new(131.9, 68.1), HIT_HALF_EXTENT));
        assert!(!point.hit_test(Point::new(132.0, 100.0), HIT_HALF_EXTENT));
        assert!(!point.hit_test(Point::new(100.0, 68.0), HIT_HALF_EXTENT));
    }

    #[test]
    fn test_compare_by_x() {
        let left = PitPoint::new(10.0, 90.0);
        let right = PitPoint::new(20.0, 0.0);
        assert_eq!(compare_by_x(&left, &right), Ordering::Less);
        assert_eq!(compare_by_x(&right, &left), Ordering::Greater);
        assert_eq!(compare_by_x(&left, &PitPoint::new(10.0, 0.0)), Ordering::Equal);
    }
}
