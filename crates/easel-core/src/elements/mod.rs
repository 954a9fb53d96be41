//! Element definitions for the canvas.
//!
//! Elements are a closed set of kinds sharing an [`ElementBase`]. Every
//! operation on [`Element`] is pure: it returns a new value and leaves the
//! receiver untouched, so the document can swap whole elements in place.

mod frame;
mod image;
mod text;
mod video;

pub use frame::FrameElement;
pub use image::{ImageElement, ImageFit};
pub use text::{FontWeight, PLACEHOLDER_TEXT, TextAlign, TextElement, committed_content};
pub use video::VideoElement;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Generate a fresh element id.
///
/// Ids are UUIDv7: a millisecond timestamp followed by random bits, so they
/// sort by creation time and never collide within a session.
pub fn generate_id() -> ElementId {
    Uuid::now_v7()
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Multiply the alpha channel by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(&self, opacity: f64) -> Self {
        let opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        Self {
            a: (self.a as f64 * opacity).round() as u8,
            ..*self
        }
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

/// Visual theme. Drives default element colors and the canvas chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Default color for new text.
    pub fn text_color(&self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::rgb(0x1f, 0x29, 0x37),
            Theme::Dark => SerializableColor::rgb(0xf9, 0xfa, 0xfb),
        }
    }

    /// Default fill for new frames.
    pub fn frame_background(&self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::white(),
            Theme::Dark => SerializableColor::rgb(0x1f, 0x29, 0x37),
        }
    }

    /// Default border for new frames.
    pub fn frame_border(&self) -> SerializableColor {
        match self {
            Theme::Light => SerializableColor::rgb(0xe5, 0xe7, 0xeb),
            Theme::Dark => SerializableColor::rgb(0x37, 0x41, 0x51),
        }
    }
}

/// Discriminant of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Video,
    Frame,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Frame,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::Frame => "frame",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementBase {
    pub id: ElementId,
    /// Top-left corner in canvas space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, always in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Locked elements ignore pointer-driven changes.
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl ElementBase {
    /// A fresh base with a new id at `position` with the given size.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: generate_id(),
            x: position.x,
            y: position.y,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            locked: false,
            visible: true,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Axis-aligned rectangle in canvas space.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Edges and centre of an element in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl From<ElementBounds> for Rect {
    fn from(bounds: ElementBounds) -> Self {
        Rect::new(bounds.left, bounds.top, bounds.right, bounds.bottom)
    }
}

/// Normalise an angle in degrees into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Common trait for the per-kind element payloads.
pub trait ElementTrait {
    const KIND: ElementKind;

    fn base(&self) -> &ElementBase;

    fn base_mut(&mut self) -> &mut ElementBase;

    fn id(&self) -> ElementId {
        self.base().id
    }
}

/// Enum wrapper for all element kinds, tagged by `type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text(TextElement),
    Image(ImageElement),
    Video(VideoElement),
    Frame(FrameElement),
}

impl From<TextElement> for Element {
    fn from(element: TextElement) -> Self {
        Element::Text(element)
    }
}

impl From<ImageElement> for Element {
    fn from(element: ImageElement) -> Self {
        Element::Image(element)
    }
}

impl From<VideoElement> for Element {
    fn from(element: VideoElement) -> Self {
        Element::Video(element)
    }
}

impl From<FrameElement> for Element {
    fn from(element: FrameElement) -> Self {
        Element::Frame(element)
    }
}

impl Element {
    /// Create an element of `kind` with its default attributes at `position`.
    pub fn create(kind: ElementKind, position: Point, theme: Theme) -> Self {
        match kind {
            ElementKind::Text => TextElement::new(position, theme).into(),
            ElementKind::Image => ImageElement::new(position).into(),
            ElementKind::Video => VideoElement::new(position).into(),
            ElementKind::Frame => FrameElement::new(position, theme).into(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => TextElement::KIND,
            Element::Image(_) => ImageElement::KIND,
            Element::Video(_) => VideoElement::KIND,
            Element::Frame(_) => FrameElement::KIND,
        }
    }

    pub fn base(&self) -> &ElementBase {
        match self {
            Element::Text(e) => e.base(),
            Element::Image(e) => e.base(),
            Element::Video(e) => e.base(),
            Element::Frame(e) => e.base(),
        }
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        match self {
            Element::Text(e) => e.base_mut(),
            Element::Image(e) => e.base_mut(),
            Element::Video(e) => e.base_mut(),
            Element::Frame(e) => e.base_mut(),
        }
    }

    /// Copy of `self` with `f` applied to the shared attributes.
    fn map_base(&self, f: impl FnOnce(&mut ElementBase)) -> Self {
        let mut next = self.clone();
        f(next.base_mut());
        next
    }

    pub fn id(&self) -> ElementId {
        self.base().id
    }

    pub fn position(&self) -> Point {
        self.base().position()
    }

    pub fn rect(&self) -> Rect {
        self.base().rect()
    }

    pub fn is_locked(&self) -> bool {
        self.base().locked
    }

    pub fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Copy with a new id, shifted by `offset` on both axes.
    pub fn duplicate(&self, offset: f64) -> Self {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        let mut next = self.map_base(|base| {
            base.id = generate_id();
            base.x += offset;
            base.y += offset;
        });
        // Children belong to the original frame's grouping, not the copy.
        if let Element::Frame(frame) = &mut next {
            frame.children.clear();
        }
        next
    }

    /// Copy resized to `width` x `height`, each floored at `min_size`.
    ///
    /// With `maintain_aspect`, the dimension that changed the least (relative
    /// to the current size) is recomputed from the current aspect ratio
    /// before the floor is applied. Non-finite dimensions keep the current
    /// value.
    pub fn resized(&self, width: f64, height: f64, maintain_aspect: bool, min_size: f64) -> Self {
        let base = self.base();
        let mut width = if width.is_finite() { width } else { base.width };
        let mut height = if height.is_finite() { height } else { base.height };

        if maintain_aspect && base.width > 0.0 && base.height > 0.0 {
            let ratio = base.width / base.height;
            let dw = ((width - base.width) / base.width).abs();
            let dh = ((height - base.height) / base.height).abs();
            if dw >= dh {
                height = width / ratio;
            } else {
                width = height * ratio;
            }
        }

        let min_size = if min_size.is_finite() { min_size.max(0.0) } else { 0.0 };
        self.map_base(|base| {
            base.width = width.max(min_size);
            base.height = height.max(min_size);
        })
    }

    /// Copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        if !dx.is_finite() || !dy.is_finite() {
            return self.clone();
        }
        self.map_base(|base| {
            base.x += dx;
            base.y += dy;
        })
    }

    /// Copy with its top-left corner at `position`.
    pub fn moved_to(&self, position: Point) -> Self {
        if !position.x.is_finite() || !position.y.is_finite() {
            return self.clone();
        }
        self.map_base(|base| {
            base.x = position.x;
            base.y = position.y;
        })
    }

    /// Copy occupying `rect`, every other attribute unchanged.
    pub fn with_rect(&self, rect: Rect) -> Self {
        if ![rect.x0, rect.y0, rect.x1, rect.y1].iter().all(|v| v.is_finite()) {
            return self.clone();
        }
        self.map_base(|base| {
            base.x = rect.x0;
            base.y = rect.y0;
            base.width = rect.width();
            base.height = rect.height();
        })
    }

    /// Copy with its shared attributes brought back inside their ranges:
    /// size floored at `min_size`, rotation in `[0, 360)` and opacity in
    /// `[0, 1]`. Non-finite values fall back to the defaults.
    pub fn normalized(&self, min_size: f64) -> Self {
        let min_size = if min_size.is_finite() { min_size.max(0.0) } else { 0.0 };
        let finite_or = |value: f64, fallback: f64| if value.is_finite() { value } else { fallback };
        self.map_base(|base| {
            base.x = finite_or(base.x, 0.0);
            base.y = finite_or(base.y, 0.0);
            base.width = finite_or(base.width, min_size).max(min_size);
            base.height = finite_or(base.height, min_size).max(min_size);
            base.rotation = normalize_rotation(finite_or(base.rotation, 0.0));
            base.opacity = if base.opacity.is_nan() {
                1.0
            } else {
                base.opacity.clamp(0.0, 1.0)
            };
        })
    }

    /// Copy rotated by `delta` degrees, normalised into `[0, 360)`.
    pub fn rotated(&self, delta: f64) -> Self {
        if !delta.is_finite() {
            return self.clone();
        }
        self.map_base(|base| base.rotation = normalize_rotation(base.rotation + delta))
    }

    /// Copy with `opacity` clamped into `[0, 1]`. NaN keeps the current value.
    pub fn with_opacity(&self, opacity: f64) -> Self {
        if opacity.is_nan() {
            return self.clone();
        }
        self.map_base(|base| base.opacity = opacity.clamp(0.0, 1.0))
    }

    pub fn toggled_lock(&self) -> Self {
        self.map_base(|base| base.locked = !base.locked)
    }

    pub fn toggled_visibility(&self) -> Self {
        self.map_base(|base| base.visible = !base.visible)
    }

    /// Whether the canvas point lies inside the element's box (edges included).
    ///
    /// Rotation is not taken into account: a rotated element is hit-tested
    /// against its unrotated box.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let base = self.base();
        x >= base.x && x <= base.x + base.width && y >= base.y && y <= base.y + base.height
    }

    pub fn bounds(&self) -> ElementBounds {
        let base = self.base();
        ElementBounds {
            left: base.x,
            top: base.y,
            right: base.x + base.width,
            bottom: base.y + base.height,
            center_x: base.x + base.width / 2.0,
            center_y: base.y + base.height / 2.0,
        }
    }

    pub fn as_text(&self) -> Option<&TextElement> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageElement> {
        match self {
            Element::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_video(&self) -> Option<&VideoElement> {
        match self {
            Element::Video(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&FrameElement> {
        match self {
            Element::Frame(f) => Some(f),
            _ => None,
        }
    }
}
