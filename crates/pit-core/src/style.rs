//! View colors and their fallback defaults.

use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Style errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB` (alpha first, as in Android color resources).
pub fn parse_color(s: &str) -> Result<SerializableColor, StyleError> {
    let invalid = || StyleError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok(SerializableColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(SerializableColor::new(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
        _ => Err(invalid()),
    }
}

/// Raw, unresolved color attributes as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    pub canvas_color: Option<String>,
    pub axes_color: Option<String>,
    pub line_color: Option<String>,
    pub point_color: Option<String>,
}

/// Resolved colors used to draw the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitStyle {
    /// Background fill.
    pub canvas_color: SerializableColor,
    /// Horizontal and vertical axis lines.
    pub axes_color: SerializableColor,
    /// Polyline connecting the points.
    pub line_color: SerializableColor,
    /// Point markers.
    pub point_color: SerializableColor,
}

impl PitStyle {
    pub const DEFAULT_CANVAS: SerializableColor = SerializableColor::rgb(250, 250, 250);
    pub const DEFAULT_AXES: SerializableColor = SerializableColor::rgb(120, 120, 120);
    pub const DEFAULT_LINE: SerializableColor = SerializableColor::rgb(59, 130, 246);
    pub const DEFAULT_POINT: SerializableColor = SerializableColor::rgb(239, 68, 68);

    /// Resolve raw attributes, falling back to defaults for missing or
    /// malformed values.
    pub fn resolve(attrs: &StyleAttributes) -> Self {
        Self {
            canvas_color: resolve_one("canvas_color", attrs.canvas_color.as_deref(), Self::DEFAULT_CANVAS),
            axes_color: resolve_one("axes_color", attrs.axes_color.as_deref(), Self::DEFAULT_AXES),
            line_color: resolve_one("line_color", attrs.line_color.as_deref(), Self::DEFAULT_LINE),
            point_color: resolve_one("point_color", attrs.point_color.as_deref(), Self::DEFAULT_POINT),
        }
    }
}

impl Default for PitStyle {
    fn default() -> Self {
        Self {
            canvas_color: Self::DEFAULT_CANVAS,
            axes_color: Self::DEFAULT_AXES,
            line_color: Self::DEFAULT_LINE,
            point_color: Self::DEFAULT_POINT,
        }
    }
}

fn resolve_one(name: &str, raw: Option<&str>, fallback: SerializableColor) -> SerializableColor {
    match raw.map(parse_color) {
        None => fallback,
        Some(Ok(color)) => color,
        Some(Err(e)) => {
            log::warn!("Style attribute {}: {}, using default", name, e);
            fallback
        }
    }
}
