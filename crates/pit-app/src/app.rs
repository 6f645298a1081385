//! Main application state and event loop.

use kurbo::{Point, Size};
use peniko::Color;
use pit_core::{ConfigError, PitConfig, PitView, PointerEvent, ViewLayout};
use pit_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use crate::ui::{UiAction, UiState, render_ui};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "PIT_CONFIG";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Fill for window area around the square view.
    pub background_color: Color,
    pub view: PitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Pit".to_string(),
            width: 720,
            height: 720,
            background_color: Color::from_rgba8(30, 30, 30, 255),
            view: PitConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from the first CLI argument or `PIT_CONFIG`.
    pub fn from_env() -> Result<Self, AppError> {
        let path = config_path(std::env::args().nth(1), std::env::var(CONFIG_ENV_VAR).ok());
        Self::from_path(path)
    }

    /// Load view settings from `path`, or use defaults when there is none.
    pub fn from_path(path: Option<PathBuf>) -> Result<Self, AppError> {
        let view = match path {
            Some(path) => PitConfig::load(&path)?,
            None => {
                log::info!("No config file given, using defaults");
                PitConfig::default()
            }
        };
        Ok(Self {
            view,
            ..Self::default()
        })
    }
}

/// Pick the config path. The CLI argument wins over the environment.
pub fn config_path(arg: Option<String>, env: Option<String>) -> Option<PathBuf> {
    arg.or(env).filter(|s| !s.trim().is_empty()).map(PathBuf::from)
}

/// Map a touch phase and location to a pointer event in window coordinates.
fn touch_to_pointer(phase: TouchPhase, location: PhysicalPosition<f64>) -> PointerEvent {
    let position = Point::new(location.x, location.y);
    match phase {
        TouchPhase::Started => PointerEvent::Down { position },
        TouchPhase::Moved => PointerEvent::Move { position },
        TouchPhase::Ended => PointerEvent::Up { position },
        TouchPhase::Cancelled => PointerEvent::Cancel,
    }
}

/// Route a touch so only one finger drives the view.
///
/// The first `Started` claims the gesture. Touches with any other id are
/// dropped until the claiming finger ends or is cancelled.
fn route_touch(
    active: &mut Option<u64>,
    id: u64,
    phase: TouchPhase,
    location: PhysicalPosition<f64>,
) -> Option<PointerEvent> {
    match (phase, *active) {
        (TouchPhase::Started, None) => *active = Some(id),
        (TouchPhase::Started, Some(_)) => return None,
        (TouchPhase::Moved, Some(current)) if current == id => {}
        (TouchPhase::Ended | TouchPhase::Cancelled, Some(current)) if current == id => *active = None,
        _ => return None,
    }
    Some(touch_to_pointer(phase, location))
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    view_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    view: PitView,
    layout: ViewLayout,
    /// Last cursor position in window coordinates.
    cursor: Point,
    /// Touch id currently driving the view.
    active_touch: Option<u64>,
}

impl AppState {
    /// Forward a window-space pointer event to the view.
    fn pointer(&mut self, event: PointerEvent) {
        let local = self.layout.event_to_view(event);
        self.view.handle_pointer_event(local);
        if self.view.needs_redraw() {
            self.window.request_redraw();
        }
    }

    fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::AddPoint => {
                self.view.add_point();
            }
        }
        self.window.request_redraw();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.layout = ViewLayout::centered(Size::new(width as f64, height as f64));
        self.view.on_size_changed(self.layout.size());
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new().map_err(|e| AppError::EventLoop(e.to_string()))?;
        let mut app = App::with_config(config);
        event_loop
            .run_app(&mut app)
            .map_err(|e| AppError::EventLoop(e.to_string()))
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) -> Result<(), RendererError> {
        let render_cx = self
            .render_cx
            .as_ref()
            .ok_or_else(|| RendererError::InitFailed("RenderContext not initialized".to_string()))?;
        let device = &render_cx.devices[surface.dev_id].device;

        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{:?}", e)))?;

        // Vello renders to Rgba8Unorm; the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut state = AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            view_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            view: PitView::new(self.config.view.clone()),
            layout: ViewLayout::default(),
            cursor: Point::ZERO,
            active_touch: None,
        };
        state.resize(state.surface.config.width, state.surface.config.height);

        log::info!(
            "Pit initialized - {}x{} window, {} view",
            state.surface.config.width,
            state.surface.config.height,
            state.layout.side
        );
        log::info!("Keyboard shortcuts:");
        ShortcutRegistry::log_all();

        self.state = Some(state);
        window.request_redraw();
        Ok(())
    }

    /// Build the scene and egui output for one frame and present it.
    fn redraw(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };
        state.view.take_redraw();

        state.ui_state.point_count = state.view.points().len();
        state.ui_state.dragging = state.view.drag_state().is_dragging();

        let egui_input = state.egui_state.take_egui_input(&state.window);
        let mut ui_action = None;
        let egui_output = state.egui_ctx.run(egui_input, |ctx| {
            ui_action = render_ui(ctx, &state.ui_state);
        });
        state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
        let egui_primitives = state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);
        let egui_repaint = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let ctx = RenderContext::new(&state.view, Size::new(width as f64, height as f64))
            .with_layout(&state.layout)
            .with_background(self.config.background_color);
        state.view_renderer.build_scene(&ctx);
        let base_color = state.view_renderer.background_color(&ctx);
        let scene = state.view_renderer.take_scene();

        let Some(render_cx) = self.render_cx.as_ref() else {
            return;
        };

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("{}", RendererError::Surface(format!("{:?}", e)));
                return;
            }
        };

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a StorageBinding Rgba8Unorm target
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = state.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("{}", RendererError::RenderFailed(format!("{:?}", e)));
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
            state
                .texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            state.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
            state.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu needs a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            state.egui_renderer.render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            state.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        if let Some(action) = ui_action {
            state.apply_ui_action(action);
        }
        if egui_repaint || state.view.needs_redraw() {
            state.window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface: RenderSurface<'static> = match pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        )) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("{}", RendererError::Surface(format!("{:?}", e)));
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.finish_init(window, surface) {
            log::error!("{}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::RedrawRequested) {
            self.redraw();
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        // A drag in progress keeps the pointer even when it passes over egui
        let dragging = state.view.drag_state().is_dragging();
        let egui_wants_pointer = !dragging
            && (egui_response.consumed
                || state.egui_ctx.is_pointer_over_area()
                || state.egui_ctx.wants_pointer_input());
        let egui_wants_keyboard = state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state.resize(size.width, size.height);
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Point::new(position.x, position.y);
                if egui_wants_pointer {
                    return;
                }
                state.pointer(PointerEvent::Move { position: state.cursor });
            }

            WindowEvent::MouseInput { state: btn_state, button: MouseButton::Left, .. } => {
                let position = state.cursor;
                match btn_state {
                    ElementState::Pressed => {
                        if egui_wants_pointer {
                            return;
                        }
                        state.pointer(PointerEvent::Down { position });
                    }
                    // Always release so a drag never gets stuck
                    ElementState::Released => state.pointer(PointerEvent::Up { position }),
                }
            }

            WindowEvent::Touch(touch) => {
                let Some(event) = route_touch(&mut state.active_touch, touch.id, touch.phase, touch.location)
                else {
                    return;
                };
                if matches!(event, PointerEvent::Down { .. }) && egui_wants_pointer {
                    state.active_touch = None;
                    return;
                }
                if let Some(position) = event.position() {
                    state.cursor = position;
                }
                state.pointer(event);
            }

            WindowEvent::Focused(false) => {
                state.active_touch = None;
                state.view.cancel_drag();
                if state.view.needs_redraw() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat || egui_wants_keyboard {
                    return;
                }
                let action = match &event.logical_key {
                    Key::Character(c) => ShortcutRegistry::lookup(c.as_str()),
                    Key::Named(NamedKey::Escape) => ShortcutRegistry::lookup("Escape"),
                    _ => None,
                };
                match action {
                    Some(ShortcutAction::Ui(ui_action)) => state.apply_ui_action(ui_action),
                    Some(ShortcutAction::CancelDrag) => {
                        state.view.cancel_drag();
                        state.window.request_redraw();
                    }
                    None => {}
                }
            }

            _ => {}
        }
    }
}
