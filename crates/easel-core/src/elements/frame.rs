//! Frame element: a styled container that groups other elements.

use super::{ElementBase, ElementId, ElementKind, ElementTrait, SerializableColor, Theme};
use kurbo::{Point, RoundedRect};
use serde::{Deserialize, Serialize};

/// A frame element.
///
/// `children` is a logical grouping by id; the document still owns every
/// element, and a child is drawn wherever it sits in the z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameElement {
    #[serde(flatten)]
    pub base: ElementBase,
    pub background_color: SerializableColor,
    pub border_color: SerializableColor,
    pub border_width: f64,
    pub border_radius: f64,
    #[serde(default)]
    pub children: Vec<ElementId>,
}

impl FrameElement {
    pub const DEFAULT_WIDTH: f64 = 400.0;
    pub const DEFAULT_HEIGHT: f64 = 300.0;
    pub const DEFAULT_BORDER_WIDTH: f64 = 1.0;
    pub const DEFAULT_BORDER_RADIUS: f64 = 8.0;

    pub fn new(position: Point, theme: Theme) -> Self {
        Self {
            base: ElementBase::new(position, Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT),
            background_color: theme.frame_background(),
            border_color: theme.frame_border(),
            border_width: Self::DEFAULT_BORDER_WIDTH,
            border_radius: Self::DEFAULT_BORDER_RADIUS,
            children: Vec::new(),
        }
    }

    /// Copy with `child` appended. Adding itself or an existing child is a no-op.
    pub fn with_child(&self, child: ElementId) -> Self {
        let mut next = self.clone();
        if child != self.base.id && !next.children.contains(&child) {
            next.children.push(child);
        }
        next
    }

    /// Copy with `child` removed.
    pub fn without_child(&self, child: ElementId) -> Self {
        let mut next = self.clone();
        next.children.retain(|id| *id != child);
        next
    }

    pub fn contains_child(&self, child: ElementId) -> bool {
        self.children.contains(&child)
    }

    /// Outline of the frame, radius capped at half the shorter side.
    pub fn outline(&self) -> RoundedRect {
        let rect = self.base.rect();
        let max_radius = rect.width().min(rect.height()) / 2.0;
        rect.to_rounded_rect(self.border_radius.clamp(0.0, max_radius))
    }
}

impl ElementTrait for FrameElement {
    const KIND: ElementKind = ElementKind::Frame;

    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }
}
