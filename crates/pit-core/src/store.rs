//! Ordered point storage.

use crate::point::{PitPoint, PointId, PointOrdering, compare_by_x};
use kurbo::{Point, Rect};

/// Points kept sorted by an ordering function (ascending x by default).
///
/// Sorting is stable, so points that compare equal keep their insertion order.
#[derive(Debug, Clone)]
pub struct PointStore {
    points: Vec<PitPoint>,
    ordering: PointOrdering,
}

impl Default for PointStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PointStore {
    /// Create an empty store ordered by x.
    pub fn new() -> Self {
        Self::with_ordering(compare_by_x)
    }

    /// Create an empty store with a custom ordering.
    pub fn with_ordering(ordering: PointOrdering) -> Self {
        Self {
            points: Vec::with_capacity(5),
            ordering,
        }
    }

    /// Append a point and restore ordering. Returns the point's id.
    pub fn insert(&mut self, point: PitPoint) -> PointId {
        let id = point.id();
        self.points.push(point);
        self.sort();
        id
    }

    /// Append several points, sorting once at the end.
    pub fn extend(&mut self, points: impl IntoIterator<Item = PitPoint>) {
        self.points.extend(points);
        self.sort();
    }

    /// Move a point and restore ordering.
    /// Returns false if no point has this id.
    pub fn update(&mut self, id: PointId, position: Point) -> bool {
        match self.points.iter_mut().find(|p| p.id() == id) {
            Some(point) => {
                point.set_position(position);
                self.sort();
                true
            }
            None => false,
        }
    }

    /// First point (in sorted order) whose touch window contains `query`.
    pub fn find(&self, query: Point, half_extent: f64) -> Option<&PitPoint> {
        self.points.iter().find(|p| p.hit_test(query, half_extent))
    }

    pub fn get(&self, id: PointId) -> Option<&PitPoint> {
        self.points.iter().find(|p| p.id() == id)
    }

    /// Points in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &PitPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[PitPoint] {
        &self.points
    }

    /// Positions in sorted order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// Scale every point about the origin.
    /// Positive factors keep the x-order, so no re-sort happens.
    pub fn rescale(&mut self, sx: f64, sy: f64) {
        for point in &mut self.points {
            point.position = Point::new(point.position.x * sx, point.position.y * sy);
        }
        if sx <= 0.0 {
            self.sort();
        }
    }

    /// Pull every point inside `bounds`. An axis too narrow to hold a point
    /// collapses to its midpoint.
    pub fn clamp_into(&mut self, bounds: Rect) {
        for point in &mut self.points {
            point.position = Point::new(
                clamp_axis(point.position.x, bounds.x0, bounds.x1),
                clamp_axis(point.position.y, bounds.y0, bounds.y1),
            );
        }
        self.sort();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check that adjacent points respect the store's ordering.
    pub fn is_sorted(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| (self.ordering)(&w[0], &w[1]).is_le())
    }

    fn sort(&mut self) {
        self.points.sort_by(self.ordering);
    }
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if min <= max {
        value.clamp(min, max)
    } else {
        (min + max) / 2.0
    }
}
