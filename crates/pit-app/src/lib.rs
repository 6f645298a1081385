//! Pit Application
//!
//! The application shell: windowing, input mapping, the toolbar and
//! the render loop around a `PitView`.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, CONFIG_ENV_VAR, config_path};
pub use shortcuts::{Shortcut, ShortcutAction, ShortcutRegistry};
pub use ui::{UiAction, UiState, render_ui};
