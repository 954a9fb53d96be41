//! Per-kind interaction controllers.
//!
//! A controller holds the transient gesture state of the element it is bound
//! to. Controllers never touch the document: they hand back replacement
//! elements in a [`Response`] and the canvas swaps them in.

mod frame;
mod gesture;
mod media;
mod text;

pub use frame::FrameController;
pub use gesture::Gesture;
pub use media::MediaController;
pub use text::{TextController, TextKey};

use crate::config::EditorConfig;
use crate::elements::{Element, ElementId, ElementKind};
use crate::input::{Modifiers, MouseButton};
use crate::selection::HandleKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// State of an element's interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    Resizing(HandleKind),
    /// Text only.
    Editing,
}

/// A pointer event resolved against the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub screen: Point,
    pub canvas: Point,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// The press completed a double-click.
    pub double_click: bool,
}

/// Viewport parameters a gesture needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Current zoom percentage.
    pub zoom: f64,
    pub min_size: f64,
    /// Handle size in screen pixels.
    pub handle_size: f64,
}

impl GestureContext {
    pub fn new(zoom: f64, config: &EditorConfig) -> Self {
        Self {
            zoom,
            min_size: config.min_element_size,
            handle_size: config.handle_size,
        }
    }
}

/// Result of routing an event to a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// The controller did not use the event.
    NotHandled,
    /// The event changed controller state only.
    Handled,
    /// The element should be replaced by this value.
    Replace(Element),
}

impl Response {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Response::NotHandled)
    }
}

/// The controller for one element, chosen by its kind.
#[derive(Debug, Clone)]
pub enum Controller {
    Text(TextController),
    Media(MediaController),
    Frame(FrameController),
}

impl Controller {
    /// Create the controller matching `element`'s kind.
    pub fn for_element(element: &Element) -> Self {
        let id = element.id();
        match element.kind() {
            ElementKind::Text => Controller::Text(TextController::new(id)),
            kind @ (ElementKind::Image | ElementKind::Video) => {
                Controller::Media(MediaController::new(id, kind))
            }
            ElementKind::Frame => Controller::Frame(FrameController::new(id)),
        }
    }

    pub fn element_id(&self) -> ElementId {
        match self {
            Controller::Text(c) => c.element_id(),
            Controller::Media(c) => c.element_id(),
            Controller::Frame(c) => c.element_id(),
        }
    }

    pub fn state(&self) -> GestureState {
        match self {
            Controller::Text(c) => c.state(),
            Controller::Media(c) => c.gesture().state(),
            Controller::Frame(c) => c.gesture().state(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.state() == GestureState::Editing
    }

    pub fn pointer_down(
        &mut self,
        element: &Element,
        is_selected: bool,
        input: &PointerInput,
        ctx: &GestureContext,
    ) -> Response {
        match self {
            Controller::Text(c) => c.pointer_down(element, is_selected, input, ctx),
            Controller::Media(c) => c.gesture_mut().pointer_down(element, is_selected, input, ctx),
            Controller::Frame(c) => c.gesture_mut().pointer_down(element, is_selected, input, ctx),
        }
    }

    /// Apply a move to `current`, the element as it stands in the document.
    pub fn pointer_move(
        &mut self,
        current: &Element,
        input: &PointerInput,
        ctx: &GestureContext,
    ) -> Response {
        match self {
            Controller::Text(c) => c.gesture_mut().pointer_move(current, input, ctx),
            Controller::Media(c) => c.gesture_mut().pointer_move(current, input, ctx),
            Controller::Frame(c) => c.gesture_mut().pointer_move(current, input, ctx),
        }
    }

    /// Release or pointer-leave. Returns whether a gesture was committed.
    pub fn pointer_up(&mut self) -> bool {
        match self {
            Controller::Text(c) => c.gesture_mut().end(),
            Controller::Media(c) => c.gesture_mut().end(),
            Controller::Frame(c) => c.gesture_mut().end(),
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextController> {
        match self {
            Controller::Text(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaController> {
        match self {
            Controller::Media(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Theme;

    #[test]
    fn test_routes_by_kind() {
        for kind in ElementKind::ALL {
            let element = Element::create(kind, Point::ZERO, Theme::Light);
            let controller = Controller::for_element(&element);
            assert_eq!(controller.element_id(), element.id());
            assert_eq!(controller.state(), GestureState::Idle);
            let expected = match kind {
                ElementKind::Text => matches!(controller, Controller::Text(_)),
                ElementKind::Image | ElementKind::Video => matches!(controller, Controller::Media(_)),
                ElementKind::Frame => matches!(controller, Controller::Frame(_)),
            };
            assert!(expected, "{kind} routed to the wrong controller");
        }
    }

    #[test]
    fn test_media_controller_remembers_kind() {
        let video = Element::create(ElementKind::Video, Point::ZERO, Theme::Light);
        let controller = Controller::for_element(&video);
        assert_eq!(controller.as_media().map(|c| c.kind()), Some(ElementKind::Video));
    }
}
