//! Pit Core Library
//!
//! Platform-agnostic state for the pit view: an x-sorted point store,
//! hit-testing, the drag state machine, styling and configuration.

pub mod config;
pub mod drag;
pub mod input;
pub mod layout;
pub mod point;
pub mod random;
pub mod store;
pub mod style;
pub mod view;

pub use config::{ConfigError, ConfigResult, LineMode, PitConfig};
pub use drag::DragState;
pub use input::PointerEvent;
pub use layout::{ViewLayout, measure};
pub use point::{HIT_HALF_EXTENT, POINT_RADIUS, PitPoint, PointId, PointOrdering, compare_by_x};
pub use random::{RandomSource, XorShiftRng};
pub use store::PointStore;
pub use style::{PitStyle, SerializableColor, StyleAttributes, StyleError, parse_color};
pub use view::PitView;
