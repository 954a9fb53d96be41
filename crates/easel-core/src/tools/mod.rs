//! Tool system for the canvas.
//!
//! Creation tools are one-shot: activating one produces exactly one element
//! and the manager drops straight back to [`ToolKind::Select`].

use crate::elements::{Element, ElementKind, Theme};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Alt text given to images created by the AI tool until a generated source
/// arrives.
pub const AI_IMAGE_ALT: &str = "AI generated image";

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Text,
    Image,
    /// Creates a frame.
    Shape,
    /// Creates an image placeholder for generated content.
    Ai,
}

impl ToolKind {
    /// Element kind a creation tool produces, `None` for [`ToolKind::Select`].
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Text => Some(ElementKind::Text),
            ToolKind::Image | ToolKind::Ai => Some(ElementKind::Image),
            ToolKind::Shape => Some(ElementKind::Frame),
        }
    }
}

/// Tracks the active tool.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    current_tool: ToolKind,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Activate `tool`.
    ///
    /// A creation tool builds its element at `position` and returns it for the
    /// caller to append and select; the manager is back on `Select` either way.
    pub fn activate(&mut self, tool: ToolKind, position: Point, theme: Theme) -> Option<Element> {
        self.current_tool = tool;
        let created = tool.element_kind().map(|kind| {
            let element = Element::create(kind, position, theme);
            match (tool, element) {
                (ToolKind::Ai, Element::Image(image)) => Element::Image(image.with_alt(AI_IMAGE_ALT)),
                (_, element) => element,
            }
        });
        if let Some(element) = &created {
            log::debug!("Tool {tool:?} created {} {}", element.kind(), element.id());
        }
        self.current_tool = ToolKind::Select;
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_tool_is_select() {
        let tools = ToolManager::new();
        assert_eq!(tools.current_tool(), ToolKind::Select);
    }

    #[test]
    fn test_creation_tools_are_one_shot() {
        let position = Point::new(100.0, 100.0);
        let cases = [
            (ToolKind::Text, ElementKind::Text),
            (ToolKind::Image, ElementKind::Image),
            (ToolKind::Shape, ElementKind::Frame),
            (ToolKind::Ai, ElementKind::Image),
        ];
        for (tool, kind) in cases {
            let mut tools = ToolManager::new();
            let element = tools.activate(tool, position, Theme::Light).unwrap();
            assert_eq!(element.kind(), kind);
            assert_eq!(element.position(), position);
            assert_eq!(tools.current_tool(), ToolKind::Select);
        }
    }

    #[test]
    fn test_ai_tool_sets_alt() {
        let mut tools = ToolManager::new();
        let element = tools.activate(ToolKind::Ai, Point::ZERO, Theme::Light).unwrap();
        let image = element.as_image().unwrap();
        assert_eq!(image.alt, AI_IMAGE_ALT);
        assert!(!image.has_source());
    }

    #[test]
    fn test_select_creates_nothing() {
        let mut tools = ToolManager::new();
        assert!(tools.activate(ToolKind::Select, Point::ZERO, Theme::Light).is_none());
        assert_eq!(tools.current_tool(), ToolKind::Select);
    }
}
