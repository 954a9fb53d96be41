//! Per-kind content renderers and the selection chrome drawn around them.

mod frame;
mod media;
mod text;

use crate::output::{DrawCommand, StrokeStyle};
use crate::renderer::ThemePalette;
use easel_core::camera::zoom_scale;
use easel_core::elements::{Element, ElementTrait, SerializableColor, Theme};
use easel_core::selection::get_handles;
use kurbo::{Point, Rect};

/// Label shown inside an image element with nothing uploaded.
pub const IMAGE_PLACEHOLDER_LABEL: &str = "Click to upload image";
/// Label shown inside a video element with nothing uploaded.
pub const VIDEO_PLACEHOLDER_LABEL: &str = "Click to upload video";

/// Everything besides the element itself that affects its rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub is_selected: bool,
    /// A text edit session is open on the element.
    pub is_editing: bool,
    pub theme: Theme,
    /// Zoom percentage.
    pub zoom: f64,
    /// Handle edge length in screen pixels.
    pub handle_size: f64,
}

impl RenderState {
    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_theme(self.theme)
    }

    /// Canvas units per screen pixel.
    pub fn pixel(&self) -> f64 {
        1.0 / zoom_scale(self.zoom)
    }
}

/// Draws the body of one element kind.
pub(crate) trait ContentRenderer: ElementTrait {
    fn render_content(&self, state: &RenderState, out: &mut Vec<DrawCommand>);
}

/// Body commands for any element.
pub(crate) fn render_content(element: &Element, state: &RenderState, out: &mut Vec<DrawCommand>) {
    match element {
        Element::Text(text) => text.render_content(state, out),
        Element::Image(image) => image.render_content(state, out),
        Element::Video(video) => video.render_content(state, out),
        Element::Frame(frame) => frame.render_content(state, out),
    }
}

/// Selection border and resize handles, sized in screen pixels.
pub(crate) fn render_selection(element: &Element, state: &RenderState, out: &mut Vec<DrawCommand>) {
    let palette = state.palette();
    let selection = SerializableColor::from(palette.selection);
    let pixel = state.pixel();

    out.push(DrawCommand::Rect {
        rect: element.rect(),
        fill: None,
        stroke: Some(StrokeStyle::dashed(selection, pixel, 4.0 * pixel)),
    });

    let half = state.handle_size * pixel / 2.0;
    for handle in get_handles(element) {
        let pos = handle.position;
        out.push(DrawCommand::Rect {
            rect: Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half),
            fill: Some(SerializableColor::from(palette.handle_fill)),
            stroke: Some(StrokeStyle::solid(selection, 1.5 * pixel)),
        });
    }
}

/// Gray box with an X and a centred label, for media without a source.
pub(crate) fn render_placeholder(
    bounds: Rect,
    label: &str,
    state: &RenderState,
    out: &mut Vec<DrawCommand>,
) {
    let palette = state.palette();
    let stroke_color = SerializableColor::from(palette.placeholder_stroke);
    let width = 2.0 * state.pixel();

    out.push(DrawCommand::Rect {
        rect: bounds,
        fill: Some(SerializableColor::from(palette.placeholder_fill)),
        stroke: Some(StrokeStyle::solid(stroke_color, width)),
    });
    out.push(DrawCommand::Line {
        from: Point::new(bounds.x0, bounds.y0),
        to: Point::new(bounds.x1, bounds.y1),
        color: stroke_color,
        width,
    });
    out.push(DrawCommand::Line {
        from: Point::new(bounds.x1, bounds.y0),
        to: Point::new(bounds.x0, bounds.y1),
        color: stroke_color,
        width,
    });
    out.push(DrawCommand::Text {
        origin: bounds.center(),
        text: label.to_string(),
        font_family: "Inter".to_string(),
        font_size: 14.0 * state.pixel(),
        font_weight: 500,
        color: SerializableColor::from(palette.placeholder_text),
        align: easel_core::elements::TextAlign::Center,
    });
}
