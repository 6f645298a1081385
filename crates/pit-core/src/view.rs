//! The pit view: points on a graph that can be dragged around.

use crate::config::PitConfig;
use crate::drag::DragState;
use crate::input::PointerEvent;
use crate::layout;
use crate::point::{PitPoint, PointId};
use crate::random::{RandomSource, XorShiftRng};
use crate::store::PointStore;
use crate::style::{PitStyle, SerializableColor};
use kurbo::{Point, Rect, Size};

/// View state consumed by a renderer and driven by host callbacks.
///
/// The host reports layout through [`PitView::on_size_changed`], forwards
/// pointer input through [`PitView::handle_pointer_event`], and redraws
/// whenever [`PitView::take_redraw`] returns true.
pub struct PitView {
    config: PitConfig,
    style: PitStyle,
    store: PointStore,
    drag: DragState,
    size: Size,
    center: Point,
    rng: Box<dyn RandomSource>,
    seeded: bool,
    needs_redraw: bool,
}

impl Default for PitView {
    fn default() -> Self {
        Self::new(PitConfig::default())
    }
}

impl PitView {
    /// Create a view. Uses the configured seed, or fresh entropy.
    pub fn new(config: PitConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => XorShiftRng::new(seed),
            None => XorShiftRng::from_entropy(),
        };
        Self::with_random(config, Box::new(rng))
    }

    /// Create a view with an explicit random source.
    pub fn with_random(config: PitConfig, rng: Box<dyn RandomSource>) -> Self {
        let style = PitStyle::resolve(&config.style);
        Self {
            config,
            style,
            store: PointStore::new(),
            drag: DragState::Idle,
            size: Size::ZERO,
            center: Point::ZERO,
            rng,
            seeded: false,
            needs_redraw: true,
        }
    }

    /// Square side this view wants for the available space.
    pub fn measure(&self, available: Size) -> f64 {
        layout::measure(available)
    }

    /// Record a new view size.
    ///
    /// The first non-empty size seeds the initial random points. Later sizes
    /// rescale existing points so they keep their relative placement, then
    /// pull them back inside the radius margin.
    pub fn on_size_changed(&mut self, size: Size) {
        if size.width <= 0.0 || size.height <= 0.0 || size == self.size {
            return;
        }
        let old = self.size;
        self.size = size;
        self.center = Point::new(size.width / 2.0, size.height / 2.0);

        if !self.seeded {
            self.seed_points();
        } else if old.width > 0.0 && old.height > 0.0 {
            self.store
                .rescale(size.width / old.width, size.height / old.height);
            self.store.clamp_into(self.interior());
        }
        self.invalidate();
    }

    fn seed_points(&mut self) {
        let r = self.config.point_radius;
        let (w, h) = (self.size.width, self.size.height);
        let mut points = Vec::with_capacity(self.config.initial_points);
        for _ in 0..self.config.initial_points {
            let x = if w - r > r { self.rng.range(r, w - r) } else { self.center.x };
            let y = if h - r > r { self.rng.range(r, h - r) } else { self.center.y };
            points.push(PitPoint::new(x, y));
        }
        self.store.extend(points);
        self.seeded = true;
        log::info!("Seeded {} points in {}x{} view", self.store.len(), w, h);
    }

    /// Add a point where the axes cross. Returns its id.
    pub fn add_point(&mut self) -> PointId {
        let id = self.store.insert(PitPoint::at(self.center));
        log::debug!("Added point at ({}, {}), {} total", self.center.x, self.center.y, self.store.len());
        self.invalidate();
        id
    }

    /// Process a pointer event in view-local coordinates.
    /// Returns true if the event changed what is drawn.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position } => {
                let was_dragging = self.drag.is_dragging();
                let hit = self.drag.press(&self.store, position, self.config.hit_half_extent);
                if let (false, Some(id)) = (was_dragging, hit) {
                    log::debug!("Drag started on point {}", id);
                }
                false
            }
            PointerEvent::Move { position } => {
                let interior = self.interior();
                let moved = self.drag.drag(&mut self.store, position, interior);
                if moved {
                    self.invalidate();
                }
                moved
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if let Some(id) = self.drag.release() {
                    log::debug!("Drag ended on point {}", id);
                }
                false
            }
        }
    }

    /// Cancel an active drag, leaving the point where it is.
    pub fn cancel_drag(&mut self) {
        self.handle_pointer_event(PointerEvent::Cancel);
    }

    /// Region a dragged point may occupy, inset by the point radius.
    pub fn interior(&self) -> Rect {
        let r = self.config.point_radius;
        Rect::new(r, r, self.size.width - r, self.size.height - r)
    }

    pub fn points(&self) -> &PointStore {
        &self.store
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn config(&self) -> &PitConfig {
        &self.config
    }

    pub fn style(&self) -> &PitStyle {
        &self.style
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Mark the view as needing a redraw.
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Clear the redraw flag, returning its previous value.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn canvas_color(&self) -> SerializableColor {
        self.style.canvas_color
    }

    pub fn set_canvas_color(&mut self, color: SerializableColor) {
        self.style.canvas_color = color;
        self.invalidate();
    }

    pub fn axes_color(&self) -> SerializableColor {
        self.style.axes_color
    }

    pub fn set_axes_color(&mut self, color: SerializableColor) {
        self.style.axes_color = color;
        self.invalidate();
    }

    pub fn line_color(&self) -> SerializableColor {
        self.style.line_color
    }

    pub fn set_line_color(&mut self, color: SerializableColor) {
        self.style.line_color = color;
        self.invalidate();
    }

    pub fn point_color(&self) -> SerializableColor {
        self.style.point_color
    }

    pub fn set_point_color(&mut self, color: SerializableColor) {
        self.style.point_color = color;
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleAttributes;

    fn view(seed: u32) -> PitView {
        let config = PitConfig { seed: Some(seed), ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        view
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y) }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up { position: Point::new(x, y) }
    }

    #[test]
    fn test_measure_is_square() {
        let view = PitView::default();
        assert_eq!(view.measure(Size::new(1280.0, 800.0)), 800.0);
    }

    #[test]
    fn test_first_layout_seeds_points() {
        let view = view(1);
        assert_eq!(view.points().len(), 5);
        assert!(view.points().is_sorted());
        assert_eq!(view.center(), Point::new(250.0, 250.0));
        for p in view.points().iter() {
            assert!(p.x() >= 16.0 && p.x() < 484.0);
            assert!(p.y() >= 16.0 && p.y() < 484.0);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a: Vec<_> = view(9).points().positions().collect();
        let b: Vec<_> = view(9).points().positions().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_size_does_not_seed() {
        let mut view = PitView::default();
        view.on_size_changed(Size::new(0.0, 300.0));
        assert!(view.points().is_empty());
    }

    #[test]
    fn test_tiny_view_seeds_at_center() {
        let mut view = PitView::default();
        view.on_size_changed(Size::new(20.0, 20.0));
        assert_eq!(view.points().len(), 5);
        assert!(view.points().positions().all(|p| p == Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_resize_rescales_instead_of_reseeding() {
        let mut view = view(3);
        let before: Vec<_> = view.points().positions().collect();

        view.on_size_changed(Size::new(1000.0, 250.0));

        let after: Vec<_> = view.points().positions().collect();
        assert_eq!(after.len(), 5);
        for (b, a) in before.iter().zip(&after) {
            assert!((a.x - (b.x * 2.0).clamp(16.0, 984.0)).abs() < 1e-9);
            assert!((a.y - (b.y * 0.5).clamp(16.0, 234.0)).abs() < 1e-9);
        }
        assert_eq!(view.center(), Point::new(500.0, 125.0));
    }

    #[test]
    fn test_shrink_keeps_points_inside_margin() {
        let config = PitConfig { initial_points: 0, ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        view.store.extend([PitPoint::new(17.0, 483.0), PitPoint::new(400.0, 20.0)]);

        view.on_size_changed(Size::new(250.0, 250.0));

        let positions: Vec<_> = view.points().positions().collect();
        assert_eq!(positions, vec![Point::new(16.0, 234.0), Point::new(200.0, 16.0)]);
        assert!(view.points().is_sorted());
    }

    #[test]
    fn test_add_point_ties_after_existing() {
        let config = PitConfig { initial_points: 0, ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        let existing = view.store.insert(PitPoint::new(250.0, 80.0));

        let added = view.add_point();

        let ids: Vec<_> = view.points().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![existing, added]);
        assert_eq!(view.points().as_slice()[1].position, Point::new(250.0, 250.0));
    }

    #[test]
    fn test_add_point_at_center() {
        let mut view = view(5);
        view.take_redraw();

        let id = view.add_point();

        assert_eq!(view.points().len(), 6);
        assert_eq!(view.points().get(id).map(|p| p.position), Some(Point::new(250.0, 250.0)));
        assert!(view.points().is_sorted());
        assert!(view.take_redraw());
    }

    #[test]
    fn test_add_point_before_layout() {
        let mut view = PitView::default();
        view.add_point();
        assert_eq!(view.points().len(), 1);
        assert_eq!(view.points().as_slice()[0].position, Point::ZERO);
    }

    #[test]
    fn test_drag_gesture() {
        let config = PitConfig { initial_points: 0, ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        let id = view.add_point();

        view.handle_pointer_event(down(260.0, 240.0));
        assert_eq!(view.drag_state(), DragState::Dragging(id));

        assert!(view.handle_pointer_event(mv(100.0, 400.0)));
        assert_eq!(view.points().get(id).map(|p| p.position), Some(Point::new(100.0, 400.0)));

        // Past the margin: ignored
        assert!(!view.handle_pointer_event(mv(495.0, 400.0)));
        assert_eq!(view.points().get(id).map(|p| p.position), Some(Point::new(100.0, 400.0)));

        view.handle_pointer_event(up(100.0, 400.0));
        assert_eq!(view.drag_state(), DragState::Idle);

        assert!(!view.handle_pointer_event(mv(200.0, 200.0)));
        assert_eq!(view.points().get(id).map(|p| p.position), Some(Point::new(100.0, 400.0)));
    }

    #[test]
    fn test_drag_keeps_points_sorted() {
        let mut view = view(11);
        let first = view.points().as_slice()[0].position;

        view.handle_pointer_event(down(first.x, first.y));
        for step in 0..40 {
            let x = 20.0 + step as f64 * 11.5;
            view.handle_pointer_event(mv(x, 300.0));
            assert!(view.points().is_sorted());
        }
        view.handle_pointer_event(up(0.0, 0.0));

        for p in view.points().iter() {
            assert!(p.x() > 0.0 && p.x() < 500.0);
        }
    }

    #[test]
    fn test_press_on_empty_space() {
        let config = PitConfig { initial_points: 0, ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        view.add_point();

        view.handle_pointer_event(down(10.0, 10.0));
        assert_eq!(view.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_cancel_drag() {
        let config = PitConfig { initial_points: 0, ..Default::default() };
        let mut view = PitView::new(config);
        view.on_size_changed(Size::new(500.0, 500.0));
        view.add_point();

        view.handle_pointer_event(down(250.0, 250.0));
        view.cancel_drag();
        assert!(!view.drag_state().is_dragging());
    }

    #[test]
    fn test_style_from_config_and_setters() {
        let config = PitConfig {
            style: StyleAttributes {
                line_color: Some("#00ff00".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let mut view = PitView::new(config);
        assert_eq!(view.line_color(), SerializableColor::rgb(0, 255, 0));
        assert_eq!(view.point_color(), PitStyle::DEFAULT_POINT);

        view.take_redraw();
        view.set_point_color(SerializableColor::rgb(1, 2, 3));
        assert_eq!(view.point_color(), SerializableColor::rgb(1, 2, 3));
        assert!(view.take_redraw());
        assert!(!view.needs_redraw());
    }

    #[test]
    fn test_injected_random_source() {
        struct Fixed;
        impl RandomSource for Fixed {
            fn next_u32(&mut self) -> u32 {
                0
            }
        }

        let mut view = PitView::with_random(PitConfig::default(), Box::new(Fixed));
        view.on_size_changed(Size::new(300.0, 200.0));
        assert!(view.points().positions().all(|p| p == Point::new(16.0, 16.0)));
    }
}
