//! Editor configuration.

use crate::elements::Theme;
use crate::error::{EditorError, EditorResult};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters of the editor core.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Lowest zoom percentage.
    pub min_zoom: f64,
    /// Highest zoom percentage.
    pub max_zoom: f64,
    /// Zoom percentage on mount and after a reset.
    pub default_zoom: f64,
    /// Percentage added/removed by zoom in/out commands.
    pub zoom_step: f64,
    /// Exponent scale applied to wheel deltas when zooming.
    pub wheel_zoom_sensitivity: f64,
    /// Pixels per wheel "line" unit.
    pub line_scroll_px: f64,
    /// Pixels per wheel "page" unit.
    pub page_scroll_px: f64,
    /// Minimum width and height of any element, in canvas units.
    pub min_element_size: f64,
    /// Where new elements land when no position is given.
    pub default_position: Point,
    /// Offset applied to duplicated elements on both axes.
    pub clone_offset: f64,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
    /// Resize handle size in screen pixels (also its hit radius).
    pub handle_size: f64,
    /// Background grid spacing in canvas units.
    pub grid_size: f64,
    /// Whether the grid is shown on mount.
    pub show_grid: bool,
    /// Theme used for new elements and chrome.
    pub theme: Theme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: 25.0,
            max_zoom: 200.0,
            default_zoom: 100.0,
            zoom_step: 10.0,
            wheel_zoom_sensitivity: 0.001,
            line_scroll_px: 16.0,
            page_scroll_px: 800.0,
            min_element_size: 20.0,
            default_position: Point::new(100.0, 100.0),
            clone_offset: 20.0,
            max_upload_bytes: 50 * 1024 * 1024,
            handle_size: 10.0,
            grid_size: 20.0,
            show_grid: true,
            theme: Theme::Light,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Check that the values describe a usable editor.
    pub fn validate(&self) -> EditorResult<()> {
        let finite = [
            self.min_zoom,
            self.max_zoom,
            self.default_zoom,
            self.zoom_step,
            self.wheel_zoom_sensitivity,
            self.line_scroll_px,
            self.page_scroll_px,
            self.min_element_size,
            self.clone_offset,
            self.handle_size,
            self.grid_size,
            self.default_position.x,
            self.default_position.y,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(EditorError::InvalidConfig("values must be finite".into()));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(EditorError::InvalidConfig(format!(
                "zoom range [{}, {}] is empty or non-positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.default_zoom) {
            return Err(EditorError::InvalidConfig(format!(
                "default zoom {} lies outside [{}, {}]",
                self.default_zoom, self.min_zoom, self.max_zoom
            )));
        }
        if self.min_element_size <= 0.0 || self.grid_size <= 0.0 || self.handle_size <= 0.0 {
            return Err(EditorError::InvalidConfig(
                "element, grid and handle sizes must be positive".into(),
            ));
        }
        Ok(())
    }
}
