//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, Renderer, axis_lines, build_polyline};
use kurbo::{Affine, BezPath, Cap, Circle, Join, Rect, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Vello-based renderer for GPU-accelerated 2D graphics.
///
/// Strokes and the polyline path are allocated once and reused every frame.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Stroke for the two axes.
    axis_stroke: Stroke,
    /// Stroke for the connecting line.
    line_stroke: Stroke,
    /// Connecting line, rebuilt in place each frame.
    line_path: BezPath,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            axis_stroke: Stroke::new(4.0),
            line_stroke: Stroke::new(8.0).with_join(Join::Round).with_caps(Cap::Round),
            line_path: BezPath::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Fill the view background and draw the axes.
    fn render_graph(&mut self, ctx: &RenderContext) {
        let view = ctx.view;
        let size = view.size();
        let style = view.style();

        self.scene.fill(
            Fill::NonZero,
            ctx.transform,
            Color::from(style.canvas_color),
            None,
            &Rect::from_origin_size((0.0, 0.0), size),
        );

        self.axis_stroke.width = view.config().axis_width;
        let axes_color = Color::from(style.axes_color);
        for axis in axis_lines(size) {
            self.scene.stroke(&self.axis_stroke, ctx.transform, axes_color, None, &axis);
        }
    }

    /// Fill a circle for every point.
    fn render_points(&mut self, ctx: &RenderContext) {
        let view = ctx.view;
        let radius = view.config().point_radius;
        let color = Color::from(view.style().point_color);
        for position in view.points().positions() {
            self.scene.fill(
                Fill::NonZero,
                ctx.transform,
                color,
                None,
                &Circle::new(position, radius),
            );
        }
    }

    /// Stroke the line through the points in x-order.
    fn render_line(&mut self, ctx: &RenderContext) {
        let view = ctx.view;
        build_polyline(&mut self.line_path, view.points().positions(), view.config().line_mode);
        if self.line_path.elements().is_empty() {
            return;
        }
        self.line_stroke.width = view.config().line_width;
        self.scene.stroke(
            &self.line_stroke,
            ctx.transform,
            Color::from(view.style().line_color),
            None,
            &self.line_path,
        );
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();

        // Window area around the square view
        let viewport = Rect::from_origin_size((0.0, 0.0), ctx.viewport_size);
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            ctx.background_color,
            None,
            &viewport,
        );

        if ctx.view.size().is_zero_area() {
            return;
        }

        self.render_graph(ctx);
        self.render_points(ctx);
        self.render_line(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use pit_core::{LineMode, PitConfig, PitView, ViewLayout};

    fn laid_out(config: PitConfig) -> PitView {
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(400.0, 400.0));
        view
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_before_layout() {
        let mut renderer = VelloRenderer::new();
        let view = PitView::default();
        let ctx = RenderContext::new(&view, Size::new(800.0, 600.0));

        renderer.build_scene(&ctx);
        assert!(!renderer.scene().encoding().is_empty());
        assert!(renderer.line_path.elements().is_empty());
    }

    #[test]
    fn test_build_scene_with_points() {
        let mut renderer = VelloRenderer::new();
        let view = laid_out(PitConfig { seed: Some(4), ..Default::default() });
        let layout = ViewLayout::centered(Size::new(600.0, 400.0));
        let ctx = RenderContext::new(&view, Size::new(600.0, 400.0)).with_layout(&layout);

        renderer.build_scene(&ctx);

        assert!(!renderer.scene().encoding().is_empty());
        // MoveTo + 4 LineTo for five seeded points
        assert_eq!(renderer.line_path.elements().len(), 5);
    }

    #[test]
    fn test_stroke_widths_follow_config() {
        let mut renderer = VelloRenderer::new();
        let view = laid_out(PitConfig {
            axis_width: 2.0,
            line_width: 3.0,
            line_mode: LineMode::Closed,
            ..Default::default()
        });
        let ctx = RenderContext::new(&view, Size::new(400.0, 400.0));

        renderer.build_scene(&ctx);

        assert_eq!(renderer.axis_stroke.width, 2.0);
        assert_eq!(renderer.line_stroke.width, 3.0);
        assert_eq!(renderer.line_path.elements().len(), 6);
    }

    #[test]
    fn test_take_scene_resets() {
        let mut renderer = VelloRenderer::new();
        let view = laid_out(PitConfig::default());
        renderer.build_scene(&RenderContext::new(&view, Size::new(400.0, 400.0)));

        let scene = renderer.take_scene();
        assert!(!scene.encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
