//! Placement of the square view inside a host window.

use crate::input::PointerEvent;
use kurbo::{Affine, Point, Size, Vec2};

/// Square side reported for the available space.
pub fn measure(available: Size) -> f64 {
    available.width.min(available.height).max(0.0)
}

/// Where the square view sits inside the window.
///
/// Converts between window (screen) coordinates and view-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewLayout {
    /// Top-left corner of the view in window coordinates.
    pub offset: Vec2,
    /// Side length of the square view.
    pub side: f64,
}

impl ViewLayout {
    /// Center a measured square inside `window`.
    pub fn centered(window: Size) -> Self {
        let side = measure(window);
        Self {
            offset: Vec2::new((window.width - side) / 2.0, (window.height - side) / 2.0),
            side,
        }
    }

    /// Transform from view-local to window coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset)
    }

    pub fn screen_to_view(&self, screen_point: Point) -> Point {
        screen_point - self.offset
    }

    /// Map a window-space pointer event into view-local coordinates.
    pub fn event_to_view(&self, event: PointerEvent) -> PointerEvent {
        event.map_position(|p| self.screen_to_view(p))
    }

    /// Size of the view itself.
    pub fn size(&self) -> Size {
        Size::new(self.side, self.side)
    }
}
