//! Renderer trait abstraction.

use kurbo::{Affine, BezPath, Line, Point, Size};
use peniko::Color;
use pit_core::{LineMode, PitView, ViewLayout};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The view to render.
    pub view: &'a PitView,
    /// Window size in physical pixels.
    pub viewport_size: Size,
    /// View-local to window transform.
    pub transform: Affine,
    /// Fill for window area outside the square view.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context that draws the view at the window origin.
    pub fn new(view: &'a PitView, viewport_size: Size) -> Self {
        Self {
            view,
            viewport_size,
            transform: Affine::IDENTITY,
            background_color: Color::from_rgba8(30, 30, 30, 255),
        }
    }

    /// Position the view according to a layout.
    pub fn with_layout(mut self, layout: &ViewLayout) -> Self {
        self.transform = layout.transform();
        self
    }

    /// Set the surrounding background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Vertical and horizontal axes through the center of a view of `size`.
pub fn axis_lines(size: Size) -> [Line; 2] {
    let center = Point::new(size.width / 2.0, size.height / 2.0);
    [
        Line::new((center.x, 0.0), (center.x, size.height)),
        Line::new((0.0, center.y), (size.width, center.y)),
    ]
}

/// Write the connecting line through `points` into `path`, reusing its storage.
/// Fewer than two points produce an empty path.
pub fn build_polyline(path: &mut BezPath, points: impl IntoIterator<Item = Point>, mode: LineMode) {
    path.truncate(0);
    let mut count = 0usize;
    for point in points {
        if count == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
        count += 1;
    }
    if count < 2 {
        path.truncate(0);
        return;
    }
    if mode == LineMode::Closed && count > 2 {
        path.close_path();
    }
}
