//! Display-list output of the element renderers.
//!
//! Commands are in canvas coordinates unless stated otherwise; the scene
//! applies the camera transform on top.

use easel_core::elements::{ElementId, ElementKind, SerializableColor, TextAlign};
use kurbo::{Affine, Point, Rect};
use serde::Serialize;

/// Outline style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: SerializableColor,
    pub width: f64,
    /// Dash length (gaps are the same length). Solid when `None`.
    pub dash: Option<f64>,
}

impl StrokeStyle {
    pub fn solid(color: SerializableColor, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: SerializableColor, width: f64, dash: f64) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Option<SerializableColor>,
        stroke: Option<StrokeStyle>,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Option<SerializableColor>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Point,
        to: Point,
        color: SerializableColor,
        width: f64,
    },
    /// One line of text. `origin` is on the baseline, at the left, centre or
    /// right edge depending on `align`.
    Text {
        origin: Point,
        text: String,
        font_family: String,
        font_size: f64,
        font_weight: u16,
        color: SerializableColor,
        align: TextAlign,
    },
    /// Image pixels stretched onto `dest` and clipped to `clip`.
    Image {
        src: String,
        dest: Rect,
        clip: Rect,
        alt: String,
    },
    /// A video surface filling `rect`.
    Video {
        src: String,
        rect: Rect,
        auto_play: bool,
        looping: bool,
        muted: bool,
    },
    /// Same-sized dots, batched in one command.
    Dots {
        centers: Vec<Point>,
        radius: f64,
        color: SerializableColor,
    },
}

/// Render output for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Rotation about the element centre, applied to every command.
    pub transform: Affine,
    pub opacity: f64,
    pub visible: bool,
    pub commands: Vec<DrawCommand>,
}

impl RenderedElement {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every text command, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
