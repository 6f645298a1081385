//! Pointer events for unified mouse/touch handling.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in view-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The gesture was aborted by the host (touch cancel, focus loss).
    Cancel,
}

impl PointerEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }

    /// Same event with its position passed through `f`.
    pub fn map_position(self, f: impl FnOnce(Point) -> Point) -> Self {
        match self {
            PointerEvent::Down { position } => PointerEvent::Down { position: f(position) },
            PointerEvent::Move { position } => PointerEvent::Move { position: f(position) },
            PointerEvent::Up { position } => PointerEvent::Up { position: f(position) },
            PointerEvent::Cancel => PointerEvent::Cancel,
        }
    }
}
