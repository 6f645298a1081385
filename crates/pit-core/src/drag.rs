//! Single-point drag state machine.

use crate::point::PointId;
use crate::store::PointStore;
use kurbo::{Point, Rect};

/// Current drag state. At most one point is selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(PointId),
}

impl DragState {
    /// Id of the point being dragged.
    pub fn selected(&self) -> Option<PointId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(id) => Some(*id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    /// Handle a press. Selects the first point whose touch window contains
    /// `position`. A press during an active drag keeps the current selection.
    pub fn press(&mut self, store: &PointStore, position: Point, half_extent: f64) -> Option<PointId> {
        if let DragState::Dragging(id) = self {
            return Some(*id);
        }
        let hit = store.find(position, half_extent).map(|p| p.id());
        if let Some(id) = hit {
            *self = DragState::Dragging(id);
        }
        hit
    }

    /// Handle a move. The selected point follows the pointer only while the
    /// pointer is strictly inside `interior`.
    /// Returns true if the store changed.
    pub fn drag(&self, store: &mut PointStore, position: Point, interior: Rect) -> bool {
        let DragState::Dragging(id) = self else {
            return false;
        };
        if !strictly_inside(interior, position) {
            return false;
        }
        store.update(*id, position)
    }

    /// Handle a release. Returns the id that was being dragged.
    pub fn release(&mut self) -> Option<PointId> {
        std::mem::take(self).selected()
    }
}

fn strictly_inside(rect: Rect, p: Point) -> bool {
    p.x > rect.x0 && p.x < rect.x1 && p.y > rect.y0 && p.y < rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PitPoint;

    fn store() -> (PointStore, PointId, PointId) {
        let mut store = PointStore::new();
        let a = store.insert(PitPoint::new(100.0, 100.0));
        let b = store.insert(PitPoint::new(300.0, 300.0));
        (store, a, b)
    }

    const INTERIOR: Rect = Rect {
        x0: 16.0,
        y0: 16.0,
        x1: 484.0,
        y1: 484.0,
    };

    #[test]
    fn test_press_selects_hit() {
        let (store, a, _) = store();
        let mut state = DragState::default();
        assert_eq!(state.press(&store, Point::new(110.0, 90.0), 32.0), Some(a));
        assert_eq!(state, DragState::Dragging(a));
    }

    #[test]
    fn test_press_miss_stays_idle() {
        let (store, _, _) = store();
        let mut state = DragState::default();
        assert_eq!(state.press(&store, Point::new(200.0, 200.0), 32.0), None);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_second_press_keeps_selection() {
        let (store, a, _) = store();
        let mut state = DragState::default();
        state.press(&store, Point::new(100.0, 100.0), 32.0);
        assert_eq!(state.press(&store, Point::new(300.0, 300.0), 32.0), Some(a));
        assert_eq!(state.selected(), Some(a));
    }

    #[test]
    fn test_drag_moves_and_resorts() {
        let (mut store, a, b) = store();
        let mut state = DragState::default();
        state.press(&store, Point::new(100.0, 100.0), 32.0);

        assert!(state.drag(&mut store, Point::new(400.0, 50.0), INTERIOR));

        let ids: Vec<_> = store.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![b, a]);
        assert_eq!(store.get(a).map(|p| p.position), Some(Point::new(400.0, 50.0)));
    }

    #[test]
    fn test_drag_outside_interior_is_ignored() {
        let (mut store, a, _) = store();
        let mut state = DragState::default();
        state.press(&store, Point::new(100.0, 100.0), 32.0);

        assert!(!state.drag(&mut store, Point::new(16.0, 200.0), INTERIOR));
        assert!(!state.drag(&mut store, Point::new(200.0, 484.0), INTERIOR));
        assert!(!state.drag(&mut store, Point::new(-5.0, -5.0), INTERIOR));
        assert_eq!(store.get(a).map(|p| p.position), Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_drag_while_idle_does_nothing() {
        let (mut store, _, _) = store();
        let state = DragState::default();
        assert!(!state.drag(&mut store, Point::new(200.0, 200.0), INTERIOR));
    }

    #[test]
    fn test_release_returns_to_idle() {
        let (mut store, a, _) = store();
        let mut state = DragState::default();
        state.press(&store, Point::new(100.0, 100.0), 32.0);
        assert_eq!(state.release(), Some(a));
        assert_eq!(state, DragState::Idle);
        assert!(!state.drag(&mut store, Point::new(200.0, 200.0), INTERIOR));
        assert_eq!(state.release(), None);
    }
}
