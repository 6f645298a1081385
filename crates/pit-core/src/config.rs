//! View configuration loaded from JSON.

use crate::point::{HIT_HALF_EXTENT, POINT_RADIUS};
use crate::style::StyleAttributes;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the connecting line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// Polyline through the points in x-order.
    #[default]
    Open,
    /// Polyline that loops back from the last point to the first.
    Closed,
}

/// Tunables for a [`crate::PitView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitConfig {
    /// Number of random points placed at first layout.
    pub initial_points: usize,
    /// Marker radius. Also the drag margin at the view edges.
    pub point_radius: f64,
    /// Half-size of the touch window around each point.
    pub hit_half_extent: f64,
    /// Stroke width of the axes.
    pub axis_width: f64,
    /// Stroke width of the connecting line.
    pub line_width: f64,
    pub line_mode: LineMode,
    /// Seed for initial placement. Random when unset.
    pub seed: Option<u32>,
    /// Color attributes.
    pub style: StyleAttributes,
}

impl Default for PitConfig {
    fn default() -> Self {
        Self {
            initial_points: 5,
            point_radius: POINT_RADIUS,
            hit_half_extent: HIT_HALF_EXTENT,
            axis_width: 4.0,
            line_width: 8.0,
            line_mode: LineMode::Open,
            seed: None,
            style: StyleAttributes::default(),
        }
    }
}

impl PitConfig {
    /// Parse and validate a config from JSON. Missing fields use defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that sizes are usable.
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("point_radius", self.point_radius),
            ("hit_half_extent", self.hit_half_extent),
            ("axis_width", self.axis_width),
            ("line_width", self.line_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.hit_half_extent < self.point_radius {
            return Err(ConfigError::Invalid(format!(
                "hit_half_extent ({}) is smaller than point_radius ({})",
                self.hit_half_extent, self.point_radius
            )));
        }
        Ok(())
    }
}
