//! Selection and resize handle system.
//!
//! Handles sit on the element's unrotated box, matching how elements are
//! hit-tested.

use crate::elements::{Element, ElementKind};
use crate::camera::zoom_scale;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleKind {
    Corner(Corner),
    /// Edge midpoint. Only frames expose these.
    Edge(Edge),
}

impl HandleKind {
    /// Whether dragging this handle moves the left edge (`Some(true)`), the
    /// right edge (`Some(false)`), or neither horizontal edge (`None`).
    fn moves_left(&self) -> Option<bool> {
        match self {
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left) => {
                Some(true)
            }
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight) | HandleKind::Edge(Edge::Right) => {
                Some(false)
            }
            HandleKind::Edge(Edge::Top | Edge::Bottom) => None,
        }
    }

    /// Same as [`Self::moves_left`] for the vertical axis.
    fn moves_top(&self) -> Option<bool> {
        match self {
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top) => {
                Some(true)
            }
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight) | HandleKind::Edge(Edge::Bottom) => {
                Some(false)
            }
            HandleKind::Edge(Edge::Left | Edge::Right) => None,
        }
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in canvas coordinates) hits this handle.
    /// `tolerance` should be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Number of resize handles an element kind exposes.
pub fn handle_count(kind: ElementKind) -> usize {
    match kind {
        ElementKind::Frame => 8,
        ElementKind::Text | ElementKind::Image | ElementKind::Video => 4,
    }
}

/// Get the resize handles for an element.
pub fn get_handles(element: &Element) -> Vec<Handle> {
    let bounds = element.rect();
    let mut handles = corner_handles(bounds);
    if element.kind() == ElementKind::Frame {
        handles.extend(edge_handles(bounds));
    }
    handles
}

fn corner_handles(bounds: Rect) -> Vec<Handle> {
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
    ]
}

fn edge_handles(bounds: Rect) -> Vec<Handle> {
    let center = bounds.center();
    vec![
        Handle::new(Point::new(center.x, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(center.x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, center.y), HandleKind::Edge(Edge::Left)),
    ]
}

/// Hit tolerance in canvas units for handles drawn `handle_size` screen
/// pixels wide at `zoom` percent.
pub fn handle_tolerance(handle_size: f64, zoom: f64) -> f64 {
    handle_size / zoom_scale(zoom)
}

/// Find the handle of `element` under a canvas point, if any.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize `original` by dragging `handle` by `delta` canvas units.
///
/// The edges the handle does not touch stay where they were. The new size is
/// passed through [`Element::resized`], so it respects the minimum floor and
/// the aspect lock; the moving edges are then placed against the anchored
/// ones.
pub fn resize_from_handle(
    original: &Element,
    handle: HandleKind,
    delta: Vec2,
    maintain_aspect: bool,
    min_size: f64,
) -> Element {
    if !delta.x.is_finite() || !delta.y.is_finite() {
        return original.clone();
    }
    let rect = original.rect();

    let width = match handle.moves_left() {
        Some(true) => rect.width() - delta.x,
        Some(false) => rect.width() + delta.x,
        None => rect.width(),
    };
    let height = match handle.moves_top() {
        Some(true) => rect.height() - delta.y,
        Some(false) => rect.height() + delta.y,
        None => rect.height(),
    };

    let resized = original.resized(width, height, maintain_aspect, min_size);
    let final_width = resized.base().width;
    let final_height = resized.base().height;

    let x = if handle.moves_left() == Some(true) {
        rect.x1 - final_width
    } else {
        rect.x0
    };
    let y = if handle.moves_top() == Some(true) {
        rect.y1 - final_height
    } else {
        rect.y0
    };
    resized.moved_to(Point::new(x, y))
}
