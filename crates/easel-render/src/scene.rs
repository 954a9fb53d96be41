//! Scene assembly: background, grid, empty state and elements for one frame.

use crate::dispatcher::ElementDispatcher;
use crate::output::{DrawCommand, RenderedElement};
use crate::renderer::{GridStyle, RenderContext, RenderResult, Renderer};
use easel_core::camera::zoom_scale;
use easel_core::canvas::Canvas;
use easel_core::elements::{SerializableColor, TextAlign};
use kurbo::{Affine, Point, Rect, Size};
use serde::Serialize;
use std::sync::Arc;

/// Message shown in the middle of an empty canvas.
pub const EMPTY_STATE_TITLE: &str = "Your canvas is empty";
pub const EMPTY_STATE_HINT: &str = "Pick a tool to add text, an image or a frame";

/// Grid lines closer than this many screen pixels are not drawn.
const MIN_GRID_SPACING_PX: f64 = 4.0;

/// One rendered frame.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub viewport_size: Size,
    /// Canvas to screen transform.
    pub transform: Affine,
    pub background: SerializableColor,
    /// Grid commands in canvas coordinates.
    pub grid: Vec<DrawCommand>,
    /// Elements in z-order (back to front).
    pub elements: Vec<Arc<RenderedElement>>,
    /// Screen-space commands drawn on top (empty-state affordance).
    pub overlay: Vec<DrawCommand>,
}

impl Frame {
    /// Export the display list as JSON.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of commands across grid, elements and overlay.
    pub fn command_count(&self) -> usize {
        self.grid.len()
            + self.overlay.len()
            + self.elements.iter().map(|e| e.commands.len()).sum::<usize>()
    }
}

/// Builds frames from a canvas, keeping the dispatcher cache between frames.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    dispatcher: ElementDispatcher,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatcher(&self) -> &ElementDispatcher {
        &self.dispatcher
    }

    /// Build the display list for the current state of `canvas`.
    pub fn build(&mut self, canvas: &Canvas, ctx: &RenderContext) -> Frame {
        self.dispatcher.set_handle_size(ctx.handle_size);
        self.dispatcher.retain(canvas.document.ids());

        let theme = canvas.theme();
        let zoom = canvas.camera.zoom;
        let elements = canvas
            .document
            .elements()
            .iter()
            .map(|element| {
                let id = element.id();
                self.dispatcher.render_with_edit(
                    element,
                    canvas.is_selected(id),
                    canvas.is_editing_element(id),
                    theme,
                    zoom,
                )
            })
            .collect();

        let grid = if canvas.show_grid() {
            grid_commands(ctx, canvas.visible_rect(), zoom)
        } else {
            Vec::new()
        };
        let overlay = if canvas.document.is_empty() {
            empty_state(ctx)
        } else {
            Vec::new()
        };

        Frame {
            viewport_size: ctx.viewport_size,
            transform: canvas.camera.transform(),
            background: SerializableColor::from(ctx.palette.background),
            grid,
            elements,
            overlay,
        }
    }
}

impl Renderer for SceneBuilder {
    fn build_scene(&mut self, canvas: &Canvas, ctx: &RenderContext) -> Frame {
        self.build(canvas, ctx)
    }
}

/// Calculate grid bounds snapped outward to multiples of `grid_size`.
fn grid_bounds(visible: Rect, grid_size: f64) -> (f64, f64, f64, f64) {
    let start_x = (visible.x0 / grid_size).floor() * grid_size;
    let start_y = (visible.y0 / grid_size).floor() * grid_size;
    let end_x = (visible.x1 / grid_size).ceil() * grid_size;
    let end_y = (visible.y1 / grid_size).ceil() * grid_size;
    (start_x, start_y, end_x, end_y)
}

fn grid_commands(ctx: &RenderContext, visible: Rect, zoom: f64) -> Vec<DrawCommand> {
    let grid_size = ctx.grid_size;
    let scale = zoom_scale(zoom);
    if !grid_size.is_finite() || grid_size * scale < MIN_GRID_SPACING_PX {
        return Vec::new();
    }
    let color = SerializableColor::from(ctx.palette.grid);
    let (start_x, start_y, end_x, end_y) = grid_bounds(visible, grid_size);

    match ctx.grid_style {
        GridStyle::None => Vec::new(),
        GridStyle::Lines => {
            let width = 0.5 / scale;
            let mut commands = Vec::new();
            // Vertical lines
            let mut x = start_x;
            while x <= end_x {
                commands.push(DrawCommand::Line {
                    from: Point::new(x, start_y),
                    to: Point::new(x, end_y),
                    color,
                    width,
                });
                x += grid_size;
            }
            // Horizontal lines
            let mut y = start_y;
            while y <= end_y {
                commands.push(DrawCommand::Line {
                    from: Point::new(start_x, y),
                    to: Point::new(end_x, y),
                    color,
                    width,
                });
                y += grid_size;
            }
            commands
        }
        GridStyle::Dots => {
            let mut centers = Vec::new();
            let mut x = start_x;
            while x <= end_x {
                let mut y = start_y;
                while y <= end_y {
                    centers.push(Point::new(x, y));
                    y += grid_size;
                }
                x += grid_size;
            }
            vec![DrawCommand::Dots {
                centers,
                radius: 1.5 / scale,
                color,
            }]
        }
    }
}

fn empty_state(ctx: &RenderContext) -> Vec<DrawCommand> {
    let center = Point::new(ctx.viewport_size.width / 2.0, ctx.viewport_size.height / 2.0);
    let color = SerializableColor::from(ctx.palette.empty_state_text);
    vec![
        DrawCommand::Text {
            origin: center,
            text: EMPTY_STATE_TITLE.to_string(),
            font_family: "Inter".to_string(),
            font_size: 20.0,
            font_weight: 600,
            color,
            align: TextAlign::Center,
        },
        DrawCommand::Text {
            origin: center + kurbo::Vec2::new(0.0, 28.0),
            text: EMPTY_STATE_HINT.to_string(),
            font_family: "Inter".to_string(),
            font_size: 14.0,
            font_weight: 400,
            color,
            align: TextAlign::Center,
        },
    ]
}
