//! Renderer trait abstraction and per-frame settings.

use crate::scene::Frame;
use easel_core::canvas::Canvas;
use easel_core::elements::Theme;
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Export failed: {0}")]
    Export(#[from] serde_json::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid (plain background).
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only dots at intersections.
    Dots,
}

/// Chrome colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub background: Color,
    pub grid: Color,
    /// Selection border and handle outline.
    pub selection: Color,
    pub handle_fill: Color,
    pub placeholder_fill: Color,
    pub placeholder_stroke: Color,
    pub placeholder_text: Color,
    pub empty_state_text: Color,
}

impl ThemePalette {
    pub const LIGHT: Self = Self {
        background: Color::from_rgba8(250, 250, 250, 255),
        grid: Color::from_rgba8(200, 200, 200, 100),
        selection: Color::from_rgba8(59, 130, 246, 255),
        handle_fill: Color::from_rgba8(255, 255, 255, 255),
        placeholder_fill: Color::from_rgba8(229, 231, 235, 255),
        placeholder_stroke: Color::from_rgba8(156, 163, 175, 255),
        placeholder_text: Color::from_rgba8(107, 114, 128, 255),
        empty_state_text: Color::from_rgba8(156, 163, 175, 255),
    };

    pub const DARK: Self = Self {
        background: Color::from_rgba8(17, 24, 39, 255),
        grid: Color::from_rgba8(75, 85, 99, 100),
        selection: Color::from_rgba8(96, 165, 250, 255),
        handle_fill: Color::from_rgba8(31, 41, 55, 255),
        placeholder_fill: Color::from_rgba8(55, 65, 81, 255),
        placeholder_stroke: Color::from_rgba8(107, 114, 128, 255),
        placeholder_text: Color::from_rgba8(156, 163, 175, 255),
        empty_state_text: Color::from_rgba8(107, 114, 128, 255),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}

/// Settings for a single render frame.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Viewport size in logical pixels.
    pub viewport_size: Size,
    /// Grid display style. Only drawn while the canvas grid is switched on.
    pub grid_style: GridStyle,
    /// Grid spacing in canvas units.
    pub grid_size: f64,
    /// Handle edge length in screen pixels.
    pub handle_size: f64,
    pub palette: ThemePalette,
}

impl RenderContext {
    /// Create a new render context.
    pub fn new(viewport_size: Size) -> Self {
        Self {
            viewport_size,
            grid_style: GridStyle::Lines,
            grid_size: 20.0,
            handle_size: 10.0,
            palette: ThemePalette::LIGHT,
        }
    }

    /// Context matching a canvas: its viewport, theme and configuration.
    pub fn for_canvas(canvas: &Canvas) -> Self {
        let config = canvas.config();
        Self::new(canvas.viewport_size())
            .with_palette(ThemePalette::for_theme(canvas.theme()))
            .with_grid_size(config.grid_size)
            .with_handle_size(config.handle_size)
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_handle_size(mut self, handle_size: f64) -> Self {
        self.handle_size = handle_size;
        self
    }

    pub fn with_palette(mut self, palette: ThemePalette) -> Self {
        self.palette = palette;
        self
    }
}

/// Trait for rendering backends.
///
/// A backend turns the canvas into a [`Frame`]; drawing the frame onto a
/// surface is up to the host.
pub trait Renderer {
    /// Build the display list for a frame.
    fn build_scene(&mut self, canvas: &Canvas, ctx: &RenderContext) -> Frame;
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::config::EditorConfig;
    use easel_core::elements::SerializableColor;

    #[test]
    fn test_context_from_canvas() {
        let config = EditorConfig {
            grid_size: 40.0,
            handle_size: 12.0,
            theme: Theme::Dark,
            ..EditorConfig::default()
        };
        let mut canvas = Canvas::with_config(config);
        canvas.set_viewport_size(1024.0, 768.0);

        let ctx = RenderContext::for_canvas(&canvas).with_grid(GridStyle::Dots);
        assert_eq!(ctx.viewport_size, Size::new(1024.0, 768.0));
        assert!((ctx.grid_size - 40.0).abs() < f64::EPSILON);
        assert!((ctx.handle_size - 12.0).abs() < f64::EPSILON);
        assert_eq!(ctx.grid_style, GridStyle::Dots);
        assert_eq!(
            SerializableColor::from(ctx.palette.background),
            SerializableColor::from(ThemePalette::DARK.background)
        );
    }
}
