//! Pit Render Library
//!
//! Renderer abstraction and implementations for the pit view.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, axis_lines, build_polyline};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
